// Fixture backend serving canned track metadata
//
// Used by unit and integration tests to drive the discovery, selection,
// and release paths without touching real media. Behavior is scriptable:
// artificial preparation delay, duplicate notifications, a fixed failure,
// or staying silent past the caller's timeout.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::player::backend::{MediaBackend, PreparationEvents};
use crate::player::tracks::{TrackFormat, TrackGroup, TrackList, TrackType};

/// Deterministic preparation backend for tests.
pub struct FixtureBackend {
    tracks: TrackList,
    delay: Option<Duration>,
    fail_with: Option<String>,
    notify_twice: bool,
    silent_hold: Option<Duration>,
    prepare_count: AtomicUsize,
    release_count: AtomicUsize,
}

impl FixtureBackend {
    /// Backend that reports the given snapshot once, immediately
    pub fn with_tracks(tracks: TrackList) -> Self {
        Self {
            tracks,
            delay: None,
            fail_with: None,
            notify_twice: false,
            silent_hold: None,
            prepare_count: AtomicUsize::new(0),
            release_count: AtomicUsize::new(0),
        }
    }

    /// Backend whose preparation always fails with `reason`
    pub fn failing(reason: &str) -> Self {
        let mut backend = Self::with_tracks(TrackList::default());
        backend.fail_with = Some(reason.to_string());
        backend
    }

    /// Backend that never reports, holding its reply channel open for
    /// `hold` before giving up; pairs with a short caller timeout
    pub fn silent_for(hold: Duration) -> Self {
        let mut backend = Self::with_tracks(TrackList::default());
        backend.silent_hold = Some(hold);
        backend
    }

    /// Sleep before reporting, to widen race windows in tests
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fire the tracks-changed notification twice per preparation
    pub fn notifying_twice(mut self) -> Self {
        self.notify_twice = true;
        self
    }

    /// Number of preparations started against this backend
    pub fn prepare_count(&self) -> usize {
        self.prepare_count.load(Ordering::SeqCst)
    }

    /// Number of engine releases observed by this backend
    pub fn release_count(&self) -> usize {
        self.release_count.load(Ordering::SeqCst)
    }
}

impl MediaBackend for FixtureBackend {
    fn prepare(&self, locator: &str, events: &dyn PreparationEvents) {
        self.prepare_count.fetch_add(1, Ordering::SeqCst);
        log::debug!("[Fixture] preparing {}", locator);

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        if let Some(hold) = self.silent_hold {
            std::thread::sleep(hold);
            return;
        }

        if let Some(reason) = &self.fail_with {
            events.on_preparation_error(reason.clone());
            return;
        }

        events.on_tracks_changed(self.tracks.clone());
        if self.notify_twice {
            events.on_tracks_changed(self.tracks.clone());
        }
    }

    fn release(&self) {
        self.release_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Canned snapshot shaped like a typical movie file: a video group and
/// three audio groups exercising every descriptor fallback.
pub fn stereo_movie_tracks() -> TrackList {
    TrackList::new(vec![
        TrackGroup::new(
            TrackType::Video,
            vec![TrackFormat {
                codec: Some("h264".to_string()),
                ..TrackFormat::default()
            }],
        ),
        TrackGroup::new(
            TrackType::Audio,
            vec![TrackFormat {
                language: Some("en".to_string()),
                label: Some("English 5.1".to_string()),
                channel_count: 6,
                sample_rate: 48_000,
                bitrate: 384_000,
                codec: Some("ac3".to_string()),
            }],
        ),
        TrackGroup::new(
            TrackType::Audio,
            vec![TrackFormat {
                language: Some("fr".to_string()),
                label: None,
                channel_count: 2,
                sample_rate: 48_000,
                bitrate: 128_000,
                codec: Some("aac".to_string()),
            }],
        ),
        TrackGroup::new(
            TrackType::Audio,
            vec![TrackFormat {
                language: None,
                label: None,
                channel_count: 2,
                sample_rate: 44_100,
                bitrate: 0,
                codec: None,
            }],
        ),
    ])
}
