// Track selector and selection parameters
//
// The selector holds the committed selection parameters for the session.
// Parameters are value types; callers build upon the current set, clear or
// add overrides, and commit the result, so a commit is always a whole
// replacement and repeating one is idempotent.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::player::tracks::TrackType;

/// Directive restricting output of one track type to a single group
///
/// `track_indices` names the sub-tracks of the group to keep; the audio
/// override always pins index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOverride {
    pub group_index: u32,
    pub track_indices: Vec<u32>,
}

impl SelectionOverride {
    /// Override pinning a group to one of its sub-tracks
    pub fn single(group_index: u32, track_index: u32) -> Self {
        Self {
            group_index,
            track_indices: vec![track_index],
        }
    }
}

/// Committed selection state, at most one override per track type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionParameters {
    overrides: BTreeMap<TrackType, SelectionOverride>,
}

impl SelectionParameters {
    /// Start a builder seeded with the current overrides
    pub fn build_upon(&self) -> SelectionParametersBuilder {
        SelectionParametersBuilder {
            overrides: self.overrides.clone(),
        }
    }

    /// The active override for a track type, if any
    pub fn override_for(&self, track_type: TrackType) -> Option<&SelectionOverride> {
        self.overrides.get(&track_type)
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

/// Builder over a parameter set
pub struct SelectionParametersBuilder {
    overrides: BTreeMap<TrackType, SelectionOverride>,
}

impl SelectionParametersBuilder {
    /// Drop any existing override for the given track type
    pub fn clear_overrides_of_type(mut self, track_type: TrackType) -> Self {
        self.overrides.remove(&track_type);
        self
    }

    /// Add an override for the given track type, replacing any present
    pub fn add_override(mut self, track_type: TrackType, selection: SelectionOverride) -> Self {
        self.overrides.insert(track_type, selection);
        self
    }

    pub fn build(self) -> SelectionParameters {
        SelectionParameters {
            overrides: self.overrides,
        }
    }
}

/// Owner of the committed selection parameters for one session
///
/// Reads and commits recover from poisoning by taking the inner value;
/// selection never panics and never blocks on anything but the lock.
pub struct TrackSelector {
    parameters: RwLock<SelectionParameters>,
}

impl TrackSelector {
    pub fn new() -> Self {
        Self {
            parameters: RwLock::new(SelectionParameters::default()),
        }
    }

    /// Snapshot of the committed parameters
    pub fn parameters(&self) -> SelectionParameters {
        match self.parameters.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Commit a new parameter set, replacing the previous one
    pub fn set_parameters(&self, parameters: SelectionParameters) {
        match self.parameters.write() {
            Ok(mut guard) => *guard = parameters,
            Err(poisoned) => *poisoned.into_inner() = parameters,
        }
    }
}

impl Default for TrackSelector {
    fn default() -> Self {
        Self::new()
    }
}
