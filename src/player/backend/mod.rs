//! Backend abstractions for the playback-preparation engine.
//!
//! A backend knows how to open a resource locator and report its track
//! groups. The engine drives preparation on a worker thread and observes
//! the backend through [PreparationEvents]; backends never talk to the
//! reply channel directly.

use crate::player::tracks::TrackList;

/// Observer a backend reports preparation results through.
///
/// `on_tracks_changed` may be invoked more than once; the engine's latch
/// keeps only the first notification per discovery request.
pub trait PreparationEvents: Send + Sync {
    fn on_tracks_changed(&self, tracks: TrackList);
    fn on_preparation_error(&self, reason: String);
}

/// Trait implemented by media preparation backends.
pub trait MediaBackend: Send + Sync {
    /// Open the resource and report its track groups via `events`.
    ///
    /// Runs on the engine's worker thread; blocking I/O is fine here.
    fn prepare(&self, locator: &str, events: &dyn PreparationEvents);

    /// Called once when the owning engine is released so backend-held
    /// resources can be freed.
    fn release(&self) {}
}

mod probe;
pub use probe::SymphoniaBackend;
