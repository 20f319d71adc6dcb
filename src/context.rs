// AppContext: Dependency Injection Container
//
// Centralizes the backend, configuration, and session lifecycle behind
// the three bridge operations. One instance backs the FFI surface; tests
// and the CLI build their own with an injected backend.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::{log_player_error, PlayerError};
use crate::managers::PlayerSessionManager;
use crate::player::backend::{MediaBackend, SymphoniaBackend};
use crate::player::discovery::DiscoveryOutcome;
use crate::player::selector::SelectionParameters;
use crate::player::session::PlayerSession;
use crate::player::tracks::AudioTrack;

/// AppContext: dependency injection container for the track bridge
///
/// Owns:
/// - the media backend used to prepare resources
/// - the session manager holding the at-most-one live player session
/// - the loaded configuration (discovery timeout, probe buffer size)
pub struct AppContext {
    config: AppConfig,
    backend: Arc<dyn MediaBackend>,
    sessions: PlayerSessionManager,
}

impl AppContext {
    /// Create an AppContext with platform configuration and the
    /// Symphonia probe backend
    pub fn new() -> Self {
        let config = Self::load_platform_config();
        let backend = Arc::new(SymphoniaBackend::new(config.probe.clone()));
        Self::with_backend(config, backend)
    }

    /// Create an AppContext over an explicit backend
    ///
    /// This is the seam tests and the CLI harness use to substitute a
    /// deterministic backend.
    pub fn with_backend(config: AppConfig, backend: Arc<dyn MediaBackend>) -> Self {
        Self {
            config,
            backend,
            sessions: PlayerSessionManager::new(),
        }
    }

    fn load_platform_config() -> AppConfig {
        #[cfg(target_os = "android")]
        {
            AppConfig::load_android()
        }

        #[cfg(not(target_os = "android"))]
        {
            AppConfig::load()
        }
    }

    // ========================================================================
    // BUSINESS LOGIC METHODS
    // ========================================================================

    /// Discover the audio tracks of a playable resource
    ///
    /// Installs a fresh player session (releasing any prior one), prepares
    /// the resource on a worker thread, and resolves with the ordered
    /// descriptors of every elementary audio track. Resolution is
    /// single-shot: success, preparation failure, or timeout.
    ///
    /// # Arguments
    /// * `path` - Resource locator; a null or empty value fails immediately
    ///   without constructing a player
    ///
    /// # Errors
    /// - `InvalidArgument` - path is null or empty
    /// - `PreparationFailed` - the backend rejected the resource
    /// - `DiscoveryTimeout` - no notification within the configured timeout
    /// - `LockPoisoned` - session lock failure
    pub async fn get_audio_tracks(
        &self,
        path: Option<String>,
    ) -> Result<Vec<AudioTrack>, PlayerError> {
        let path = match path {
            Some(path) if !path.is_empty() => path,
            _ => {
                let err = PlayerError::InvalidArgument {
                    what: "path".to_string(),
                };
                log_player_error(&err, "get_audio_tracks");
                return Err(err);
            }
        };

        let session = PlayerSession::new(Arc::clone(&self.backend));
        let receiver = session.engine().prepare(path);
        self.sessions.install(session).map_err(|err| {
            log_player_error(&err, "get_audio_tracks");
            err
        })?;

        let timeout_ms = self.config.discovery.timeout_ms;
        let outcome = tokio::time::timeout(Duration::from_millis(timeout_ms), receiver).await;

        match outcome {
            Ok(Ok(DiscoveryOutcome::Ready(tracks))) => Ok(tracks.audio_tracks()),
            Ok(Ok(DiscoveryOutcome::Failed { reason })) => {
                let err = PlayerError::PreparationFailed { reason };
                log_player_error(&err, "get_audio_tracks");
                Err(err)
            }
            Ok(Err(_closed)) => {
                let err = PlayerError::PreparationFailed {
                    reason: "discovery ended without reporting tracks".to_string(),
                };
                log_player_error(&err, "get_audio_tracks");
                Err(err)
            }
            Err(_elapsed) => {
                let err = PlayerError::DiscoveryTimeout { timeout_ms };
                log_player_error(&err, "get_audio_tracks");
                Err(err)
            }
        }
    }

    /// Restrict audio output to a previously reported group
    ///
    /// Commits a selector override pinning the group to its first
    /// sub-track. An index outside the reported groups, or the absence of
    /// a live session, leaves the committed parameters unchanged.
    ///
    /// # Arguments
    /// * `group_index` - Zero-based group index from the latest discovery;
    ///   a null value fails without touching the selector
    ///
    /// # Errors
    /// - `InvalidArgument` - group_index is null
    /// - `LockPoisoned` - session lock failure
    pub fn set_audio_track(&self, group_index: Option<u32>) -> Result<(), PlayerError> {
        let group_index = group_index.ok_or_else(|| {
            let err = PlayerError::InvalidArgument {
                what: "groupIndex".to_string(),
            };
            log_player_error(&err, "set_audio_track");
            err
        })?;

        let applied = self
            .sessions
            .with_session(|session| session.select_audio_group(group_index))
            .map_err(|err| {
                log_player_error(&err, "set_audio_track");
                err
            })?;

        if applied.is_none() {
            log::debug!(
                "[Context] ignoring selection of group {}: no live session",
                group_index
            );
        }

        Ok(())
    }

    /// Tear down the current player session
    ///
    /// Releases the engine's resources and drops the selector. A no-op
    /// when no session exists; the shell's teardown hook calls this
    /// unconditionally.
    pub fn release_player(&self) -> Result<(), PlayerError> {
        self.sessions.release().map_err(|err| {
            log_player_error(&err, "release_player");
            err
        })
    }

    // ========================================================================
    // INTROSPECTION
    // ========================================================================

    /// Committed selection parameters of the live session, if any
    pub fn current_selection(&self) -> Result<Option<SelectionParameters>, PlayerError> {
        self.sessions
            .with_session(|session| session.selector().parameters())
    }

    /// Whether a player session is currently live
    pub fn is_session_active(&self) -> Result<bool, PlayerError> {
        self.sessions.is_active()
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{stereo_movie_tracks, FixtureBackend};

    fn fixture_context(backend: FixtureBackend) -> (AppContext, Arc<FixtureBackend>) {
        let backend = Arc::new(backend);
        let context = AppContext::with_backend(
            AppConfig::default(),
            Arc::clone(&backend) as Arc<dyn MediaBackend>,
        );
        (context, backend)
    }

    #[tokio::test]
    async fn test_null_path_constructs_no_player() {
        let (context, backend) = fixture_context(FixtureBackend::with_tracks(
            stereo_movie_tracks(),
        ));

        let result = context.get_audio_tracks(None).await;

        assert!(matches!(
            result.unwrap_err(),
            PlayerError::InvalidArgument { .. }
        ));
        assert_eq!(backend.prepare_count(), 0);
        assert_eq!(context.is_session_active().unwrap(), false);
    }

    #[tokio::test]
    async fn test_empty_path_constructs_no_player() {
        let (context, backend) = fixture_context(FixtureBackend::with_tracks(
            stereo_movie_tracks(),
        ));

        let result = context.get_audio_tracks(Some(String::new())).await;

        assert!(matches!(
            result.unwrap_err(),
            PlayerError::InvalidArgument { .. }
        ));
        assert_eq!(backend.prepare_count(), 0);
    }

    #[tokio::test]
    async fn test_discovery_returns_ordered_descriptors() {
        let (context, _backend) = fixture_context(FixtureBackend::with_tracks(
            stereo_movie_tracks(),
        ));

        let tracks = context
            .get_audio_tracks(Some("fixture://movie".to_string()))
            .await
            .unwrap();

        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks[0].label, "English 5.1");
        assert_eq!(tracks[1].label, "fr");
        assert_eq!(tracks[2].label, "Audio 3");
        assert!(context.is_session_active().unwrap());
    }

    #[tokio::test]
    async fn test_null_group_index_leaves_selector_untouched() {
        let (context, _backend) = fixture_context(FixtureBackend::with_tracks(
            stereo_movie_tracks(),
        ));
        context
            .get_audio_tracks(Some("fixture://movie".to_string()))
            .await
            .unwrap();
        context.set_audio_track(Some(1)).unwrap();
        let before = context.current_selection().unwrap();

        let result = context.set_audio_track(None);

        assert!(matches!(
            result.unwrap_err(),
            PlayerError::InvalidArgument { .. }
        ));
        assert_eq!(context.current_selection().unwrap(), before);
    }

    #[tokio::test]
    async fn test_selection_without_session_is_silent() {
        let (context, _backend) = fixture_context(FixtureBackend::with_tracks(
            stereo_movie_tracks(),
        ));
        assert!(context.set_audio_track(Some(0)).is_ok());
    }
}
