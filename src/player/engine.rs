// Playback-preparation engine
//
// Owns the backend handle and the track snapshot for one session.
// `prepare` spawns a worker thread for the probe and hands the caller a
// one-shot receiver; the engine stores the snapshot when the first
// notification lands, unless the session was released in the meantime.

use std::sync::{Arc, RwLock};

use crate::player::backend::{MediaBackend, PreparationEvents};
use crate::player::discovery::{DiscoveryLatch, DiscoveryOutcome, DiscoveryReceiver};
use crate::player::tracks::TrackList;

/// State shared between the engine and its in-flight discovery worker
struct EngineShared {
    current_tracks: Option<TrackList>,
    released: bool,
}

/// Preparation engine for a single player session
pub struct PlayerEngine {
    backend: Arc<dyn MediaBackend>,
    shared: Arc<RwLock<EngineShared>>,
}

impl PlayerEngine {
    pub fn new(backend: Arc<dyn MediaBackend>) -> Self {
        Self {
            backend,
            shared: Arc::new(RwLock::new(EngineShared {
                current_tracks: None,
                released: false,
            })),
        }
    }

    /// Begin asynchronous preparation of `locator`
    ///
    /// Returns the receiver the first (and only) discovery outcome will
    /// arrive on. The probe runs on its own thread; the calling task is
    /// never blocked.
    pub fn prepare(&self, locator: String) -> DiscoveryReceiver {
        let (latch, receiver) = DiscoveryLatch::new();
        let observer = DiscoveryObserver {
            latch,
            shared: Arc::clone(&self.shared),
        };
        let backend = Arc::clone(&self.backend);

        let spawned = std::thread::Builder::new()
            .name("track-discovery".to_string())
            .spawn(move || {
                backend.prepare(&locator, &observer);
                if !observer.latch.is_complete() {
                    log::warn!("[Engine] backend finished preparation without reporting tracks");
                }
            });

        if let Err(err) = spawned {
            // Thread spawn failure: resolve the reply here so the caller
            // does not wait for the timeout.
            let (latch, fallback_receiver) = DiscoveryLatch::new();
            latch.complete(DiscoveryOutcome::Failed {
                reason: format!("failed to spawn discovery worker: {}", err),
            });
            return fallback_receiver;
        }

        receiver
    }

    /// Snapshot of the most recently discovered tracks, if any
    pub fn current_tracks(&self) -> Option<TrackList> {
        match self.shared.read() {
            Ok(guard) => guard.current_tracks.clone(),
            Err(poisoned) => poisoned.into_inner().current_tracks.clone(),
        }
    }

    /// Release the engine: drop the snapshot and detach late workers
    ///
    /// A worker completing after release no longer stores its snapshot;
    /// its latch still resolves the caller that started it. Idempotent.
    pub fn release(&self) {
        let was_released = {
            let mut guard = match self.shared.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let previous = guard.released;
            guard.released = true;
            guard.current_tracks = None;
            previous
        };

        if !was_released {
            self.backend.release();
        }
    }

    /// Whether `release` has run on this engine
    pub fn is_released(&self) -> bool {
        match self.shared.read() {
            Ok(guard) => guard.released,
            Err(poisoned) => poisoned.into_inner().released,
        }
    }
}

/// Worker-side observer: stores the snapshot, then fires the latch
struct DiscoveryObserver {
    latch: DiscoveryLatch,
    shared: Arc<RwLock<EngineShared>>,
}

impl PreparationEvents for DiscoveryObserver {
    fn on_tracks_changed(&self, tracks: TrackList) {
        {
            let mut guard = match self.shared.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if guard.released {
                log::debug!("[Engine] dropping tracks notification for released session");
            } else {
                guard.current_tracks = Some(tracks.clone());
            }
        }
        self.latch.complete(DiscoveryOutcome::Ready(tracks));
    }

    fn on_preparation_error(&self, reason: String) {
        self.latch.complete(DiscoveryOutcome::Failed { reason });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::tracks::{TrackFormat, TrackGroup, TrackType};
    use crate::testing::FixtureBackend;

    fn one_group() -> TrackList {
        TrackList::new(vec![TrackGroup::new(
            TrackType::Audio,
            vec![TrackFormat::default()],
        )])
    }

    #[tokio::test]
    async fn test_prepare_resolves_with_tracks() {
        let backend = Arc::new(FixtureBackend::with_tracks(one_group()));
        let engine = PlayerEngine::new(backend);

        let outcome = engine.prepare("fixture://one".to_string()).await.unwrap();
        assert_eq!(outcome, DiscoveryOutcome::Ready(one_group()));
        assert_eq!(engine.current_tracks(), Some(one_group()));
    }

    #[tokio::test]
    async fn test_prepare_failure_resolves_with_reason() {
        let backend = Arc::new(FixtureBackend::failing("bad container"));
        let engine = PlayerEngine::new(backend);

        match engine.prepare("fixture://bad".to_string()).await.unwrap() {
            DiscoveryOutcome::Failed { reason } => assert_eq!(reason, "bad container"),
            other => panic!("Expected Failed, got {:?}", other),
        }
        assert!(engine.current_tracks().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_notifications_deliver_once() {
        let backend = Arc::new(FixtureBackend::with_tracks(one_group()).notifying_twice());
        let engine = PlayerEngine::new(backend);

        let outcome = engine.prepare("fixture://twice".to_string()).await.unwrap();
        assert_eq!(outcome, DiscoveryOutcome::Ready(one_group()));
    }

    #[tokio::test]
    async fn test_release_drops_snapshot_and_notifies_backend() {
        let backend = Arc::new(FixtureBackend::with_tracks(one_group()));
        let engine = PlayerEngine::new(Arc::clone(&backend) as Arc<dyn MediaBackend>);

        let _ = engine.prepare("fixture://one".to_string()).await;
        assert!(engine.current_tracks().is_some());

        engine.release();
        assert!(engine.is_released());
        assert!(engine.current_tracks().is_none());
        assert_eq!(backend.release_count(), 1);

        // Second release is a no-op
        engine.release();
        assert_eq!(backend.release_count(), 1);
    }
}
