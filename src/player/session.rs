// Player session: one engine plus the selector bound to it
//
// Sessions are created per discovery request and owned by the session
// manager. Selection resolves group indices against the engine's snapshot
// and commits overrides to the selector; an index the snapshot does not
// cover is ignored without error.

use std::sync::Arc;

use crate::player::backend::MediaBackend;
use crate::player::engine::PlayerEngine;
use crate::player::selector::{SelectionOverride, TrackSelector};
use crate::player::tracks::TrackType;

/// One live playback session: engine handle and track selector
pub struct PlayerSession {
    engine: PlayerEngine,
    selector: TrackSelector,
}

impl PlayerSession {
    /// Build a fresh selector and an engine bound to the backend
    pub fn new(backend: Arc<dyn MediaBackend>) -> Self {
        Self {
            engine: PlayerEngine::new(backend),
            selector: TrackSelector::new(),
        }
    }

    pub fn engine(&self) -> &PlayerEngine {
        &self.engine
    }

    pub fn selector(&self) -> &TrackSelector {
        &self.selector
    }

    /// Restrict audio output to the given group, pinned to sub-track 0
    ///
    /// Looks the group up in the engine's current snapshot; if the index is
    /// beyond the reported groups (or nothing was discovered yet), the
    /// committed parameters stay as they are.
    pub fn select_audio_group(&self, group_index: u32) {
        let Some(tracks) = self.engine.current_tracks() else {
            log::debug!(
                "[Session] ignoring selection of group {}: no tracks discovered",
                group_index
            );
            return;
        };

        if tracks.group(group_index as usize).is_none() {
            log::debug!(
                "[Session] ignoring selection of group {}: only {} group(s) reported",
                group_index,
                tracks.len()
            );
            return;
        }

        let parameters = self
            .selector
            .parameters()
            .build_upon()
            .clear_overrides_of_type(TrackType::Audio)
            .add_override(TrackType::Audio, SelectionOverride::single(group_index, 0))
            .build();
        self.selector.set_parameters(parameters);
    }

    /// Release the engine's resources; the selector dies with the session
    pub fn release(&self) {
        self.engine.release();
    }
}
