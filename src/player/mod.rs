//! Player module housing the playback-preparation engine.
//!
//! This module exposes trait-based backends (`backend`), the per-session
//! engine and selector, and the normalized track metadata model the FFI
//! descriptors are derived from.

pub mod backend;
pub mod discovery;
pub mod engine;
pub mod selector;
pub mod session;
pub mod tracks;

pub use backend::{MediaBackend, PreparationEvents, SymphoniaBackend};
pub use discovery::{DiscoveryLatch, DiscoveryOutcome, DiscoveryReceiver};
pub use engine::PlayerEngine;
pub use selector::{SelectionOverride, SelectionParameters, TrackSelector};
pub use session::PlayerSession;
pub use tracks::{AudioTrack, TrackFormat, TrackGroup, TrackList, TrackType};
