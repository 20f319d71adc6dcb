// PlayerSessionManager: focused manager for player session lifecycle
//
// Single Responsibility: install/inspect/release of the one live session.
// Replacement goes through `install`, which releases the prior session
// before the new one takes its place, so a replaced engine can never be
// left holding resources.

use std::sync::Mutex;

use crate::error::{log_player_error, PlayerError};
use crate::player::session::PlayerSession;

/// Owns the at-most-one live player session
pub struct PlayerSessionManager {
    session: Mutex<Option<PlayerSession>>,
}

impl PlayerSessionManager {
    /// Create a manager with no session installed
    pub fn new() -> Self {
        Self {
            session: Mutex::new(None),
        }
    }

    /// Install a new session, releasing any prior one first
    ///
    /// # Returns
    /// * `Ok(())` - Session installed; a replaced predecessor was released
    /// * `Err(PlayerError::LockPoisoned)` - Lock failure
    pub fn install(&self, session: PlayerSession) -> Result<(), PlayerError> {
        let mut guard = match self.lock_session() {
            Ok(guard) => guard,
            Err(err) => {
                // The incoming session never becomes reachable; release it
                // before reporting the lock failure.
                session.release();
                return Err(err);
            }
        };

        if let Some(previous) = guard.take() {
            previous.release();
            log::info!("[SessionManager] released previous session before replacement");
        }

        *guard = Some(session);
        Ok(())
    }

    /// Run `f` against the current session, if one exists
    ///
    /// # Returns
    /// * `Ok(Some(R))` - Session present, `f` ran
    /// * `Ok(None)` - No session installed
    /// * `Err(PlayerError::LockPoisoned)` - Lock failure
    pub fn with_session<R>(
        &self,
        f: impl FnOnce(&PlayerSession) -> R,
    ) -> Result<Option<R>, PlayerError> {
        let guard = self.lock_session()?;
        Ok(guard.as_ref().map(f))
    }

    /// Release and drop the current session
    ///
    /// Safe to call when no session exists.
    pub fn release(&self) -> Result<(), PlayerError> {
        let mut guard = self.lock_session()?;

        if let Some(session) = guard.take() {
            session.release();
            log::info!("[SessionManager] player session released");
        }

        Ok(())
    }

    /// Whether a session is currently installed
    pub fn is_active(&self) -> Result<bool, PlayerError> {
        Ok(self.lock_session()?.is_some())
    }

    /// Safely acquire lock on the session slot
    ///
    /// # Returns
    /// * `Ok(MutexGuard)` - Lock acquired successfully
    /// * `Err(PlayerError::LockPoisoned)` - Lock is poisoned
    fn lock_session(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, Option<PlayerSession>>, PlayerError> {
        self.session.lock().map_err(|_| {
            let err = PlayerError::LockPoisoned {
                component: "player_session".to_string(),
            };
            log_player_error(&err, "lock_session");
            err
        })
    }
}

impl Default for PlayerSessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::tracks::TrackList;
    use crate::testing::FixtureBackend;
    use std::sync::Arc;

    fn fixture_session(backend: &Arc<FixtureBackend>) -> PlayerSession {
        PlayerSession::new(Arc::clone(backend) as Arc<dyn crate::player::MediaBackend>)
    }

    #[test]
    fn test_new_manager_has_no_session() {
        let manager = PlayerSessionManager::new();
        assert_eq!(manager.is_active().unwrap(), false);
        assert!(manager.with_session(|_| ()).unwrap().is_none());
    }

    #[test]
    fn test_install_releases_predecessor() {
        let backend = Arc::new(FixtureBackend::with_tracks(TrackList::default()));
        let manager = PlayerSessionManager::new();

        manager.install(fixture_session(&backend)).unwrap();
        manager.install(fixture_session(&backend)).unwrap();

        assert_eq!(backend.release_count(), 1);
        assert!(manager.is_active().unwrap());
    }

    #[test]
    fn test_release_is_idempotent() {
        let backend = Arc::new(FixtureBackend::with_tracks(TrackList::default()));
        let manager = PlayerSessionManager::new();

        manager.install(fixture_session(&backend)).unwrap();
        manager.release().unwrap();
        manager.release().unwrap();

        assert_eq!(backend.release_count(), 1);
        assert_eq!(manager.is_active().unwrap(), false);
    }
}
