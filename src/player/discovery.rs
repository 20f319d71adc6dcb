// One-shot delivery latch for track discovery
//
// The backend may notify more than once (tracks-changed refires, or an
// error racing a late success); the latch guarantees the pending reply
// resolves exactly once and every later notification is dropped.

use std::sync::Mutex;

use tokio::sync::oneshot;

use crate::player::tracks::TrackList;

/// Terminal outcome of one discovery request
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveryOutcome {
    /// First tracks-changed notification, with the full snapshot
    Ready(TrackList),
    /// Preparation failed before any tracks were reported
    Failed { reason: String },
}

/// Receiver side handed to the awaiting caller
pub type DiscoveryReceiver = oneshot::Receiver<DiscoveryOutcome>;

/// Single-fire latch over the discovery reply channel
///
/// The sender is consumed by the first `complete` call; the swap happens
/// under the mutex, so concurrent notifications cannot both fire.
pub struct DiscoveryLatch {
    sender: Mutex<Option<oneshot::Sender<DiscoveryOutcome>>>,
}

impl DiscoveryLatch {
    /// Create a latch and the receiver its outcome will arrive on
    pub fn new() -> (Self, DiscoveryReceiver) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                sender: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    /// Resolve the pending reply, if it has not resolved yet
    ///
    /// Returns true if this call delivered the outcome, false if the latch
    /// had already fired (or the receiver is gone).
    pub fn complete(&self, outcome: DiscoveryOutcome) -> bool {
        let sender = match self.sender.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match sender {
            Some(tx) => tx.send(outcome).is_ok(),
            None => {
                log::debug!("[Discovery] ignoring notification after first delivery");
                false
            }
        }
    }

    /// Whether the latch has already delivered its outcome
    pub fn is_complete(&self) -> bool {
        match self.sender.lock() {
            Ok(guard) => guard.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }
}
