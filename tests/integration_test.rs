//! Integration tests for the track bridge
//!
//! These tests validate the full lifecycle across the Rust layer,
//! including:
//! - Track discovery over a deterministic backend
//! - Session replacement and release semantics
//! - Selection override behavior
//! - Error propagation and typed error handling

use std::sync::Arc;
use std::time::Duration;

use media_tracks::config::{AppConfig, DiscoveryConfig};
use media_tracks::context::AppContext;
use media_tracks::error::PlayerError;
use media_tracks::player::backend::MediaBackend;
use media_tracks::player::tracks::{
    TrackFormat, TrackGroup, TrackList, TrackType, UNDETERMINED_LANGUAGE, UNKNOWN_CODEC,
};
use media_tracks::testing::{stereo_movie_tracks, FixtureBackend};

fn fixture_context(backend: FixtureBackend) -> (AppContext, Arc<FixtureBackend>) {
    fixture_context_with_config(backend, AppConfig::default())
}

fn fixture_context_with_config(
    backend: FixtureBackend,
    config: AppConfig,
) -> (AppContext, Arc<FixtureBackend>) {
    let backend = Arc::new(backend);
    let context = AppContext::with_backend(config, Arc::clone(&backend) as Arc<dyn MediaBackend>);
    (context, backend)
}

/// Test full discovery: descriptor count, order, and field fallbacks
#[tokio::test]
async fn test_discovery_emits_one_descriptor_per_audio_track() {
    let (context, _backend) = fixture_context(FixtureBackend::with_tracks(stereo_movie_tracks()));

    let tracks = context
        .get_audio_tracks(Some("fixture://movie.mkv".to_string()))
        .await
        .expect("discovery should succeed");

    // The video group is skipped; three audio groups remain
    assert_eq!(tracks.len(), 3);
    assert_eq!(
        tracks
            .iter()
            .map(|t| (t.group_index, t.track_index))
            .collect::<Vec<_>>(),
        vec![(1, 0), (2, 0), (3, 0)]
    );

    // Explicit label survives
    assert_eq!(tracks[0].label, "English 5.1");
    assert_eq!(tracks[0].language, "en");
    assert_eq!(tracks[0].channel_count, 6);
    assert_eq!(tracks[0].codec, "ac3");

    // Label falls back to language tag
    assert_eq!(tracks[1].label, "fr");

    // Label falls back to ordinal; language and codec get their sentinels
    assert_eq!(tracks[2].label, "Audio 3");
    assert_eq!(tracks[2].language, UNDETERMINED_LANGUAGE);
    assert_eq!(tracks[2].codec, UNKNOWN_CODEC);
    assert_eq!(tracks[2].bitrate, 0);
}

/// Test that a multi-track group keeps track-index order within the group
#[tokio::test]
async fn test_discovery_preserves_track_order_within_group() {
    let list = TrackList::new(vec![TrackGroup::new(
        TrackType::Audio,
        vec![
            TrackFormat {
                label: Some("Main".to_string()),
                ..TrackFormat::default()
            },
            TrackFormat {
                label: Some("Commentary".to_string()),
                ..TrackFormat::default()
            },
        ],
    )]);
    let (context, _backend) = fixture_context(FixtureBackend::with_tracks(list));

    let tracks = context
        .get_audio_tracks(Some("fixture://two-in-one".to_string()))
        .await
        .unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!((tracks[0].group_index, tracks[0].track_index), (0, 0));
    assert_eq!((tracks[1].group_index, tracks[1].track_index), (0, 1));
    assert_eq!(tracks[0].label, "Main");
    assert_eq!(tracks[1].label, "Commentary");
}

/// Test that a null path fails fast without constructing a player
#[tokio::test]
async fn test_null_path_yields_invalid_argument() {
    let (context, backend) = fixture_context(FixtureBackend::with_tracks(stereo_movie_tracks()));

    let result = context.get_audio_tracks(None).await;

    match result.unwrap_err() {
        PlayerError::InvalidArgument { what } => assert_eq!(what, "path"),
        other => panic!("Expected InvalidArgument, got {:?}", other),
    }
    assert_eq!(backend.prepare_count(), 0, "no player may be constructed");
    assert_eq!(context.is_session_active().unwrap(), false);
}

/// Test that starting a new discovery releases the prior session
#[tokio::test]
async fn test_second_discovery_replaces_and_releases_prior_session() {
    let (context, backend) = fixture_context(FixtureBackend::with_tracks(stereo_movie_tracks()));

    context
        .get_audio_tracks(Some("fixture://first.mkv".to_string()))
        .await
        .unwrap();
    context
        .get_audio_tracks(Some("fixture://second.mkv".to_string()))
        .await
        .unwrap();

    assert_eq!(backend.prepare_count(), 2);
    assert_eq!(
        backend.release_count(),
        1,
        "replaced session must be released"
    );
    assert!(context.is_session_active().unwrap());
}

/// Test concurrent discoveries: last session wins, both calls resolve
#[tokio::test]
async fn test_overlapping_discoveries_resolve_without_crash() {
    let (context, backend) = fixture_context(
        FixtureBackend::with_tracks(stereo_movie_tracks())
            .with_delay(Duration::from_millis(50)),
    );
    let context = Arc::new(context);

    let first = {
        let context = Arc::clone(&context);
        tokio::spawn(async move {
            context
                .get_audio_tracks(Some("fixture://a.mkv".to_string()))
                .await
        })
    };
    let second = {
        let context = Arc::clone(&context);
        tokio::spawn(async move {
            context
                .get_audio_tracks(Some("fixture://b.mkv".to_string()))
                .await
        })
    };

    let first = first.await.unwrap();
    let second = second.await.unwrap();

    // Each request resolves exactly once with its own probe result
    assert_eq!(first.unwrap().len(), 3);
    assert_eq!(second.unwrap().len(), 3);
    // One of the two sessions was replaced and released; one is live
    assert_eq!(backend.release_count(), 1);
    assert!(context.is_session_active().unwrap());
}

/// Test selection: one active override, pinned to sub-track 0, idempotent
#[tokio::test]
async fn test_selection_pins_group_and_is_idempotent() {
    let (context, _backend) = fixture_context(FixtureBackend::with_tracks(stereo_movie_tracks()));
    context
        .get_audio_tracks(Some("fixture://movie.mkv".to_string()))
        .await
        .unwrap();

    context.set_audio_track(Some(2)).unwrap();
    let first = context.current_selection().unwrap().unwrap();
    let selection = first.override_for(TrackType::Audio).unwrap();
    assert_eq!(first.override_count(), 1);
    assert_eq!(selection.group_index, 2);
    assert_eq!(selection.track_indices, vec![0]);

    // Repeating the same call leaves the committed state unchanged
    context.set_audio_track(Some(2)).unwrap();
    assert_eq!(context.current_selection().unwrap().unwrap(), first);
}

/// Test that switching groups replaces the previous audio override
#[tokio::test]
async fn test_reselection_replaces_previous_override() {
    let (context, _backend) = fixture_context(FixtureBackend::with_tracks(stereo_movie_tracks()));
    context
        .get_audio_tracks(Some("fixture://movie.mkv".to_string()))
        .await
        .unwrap();

    context.set_audio_track(Some(1)).unwrap();
    context.set_audio_track(Some(3)).unwrap();

    let parameters = context.current_selection().unwrap().unwrap();
    assert_eq!(parameters.override_count(), 1);
    assert_eq!(
        parameters.override_for(TrackType::Audio).unwrap().group_index,
        3
    );
}

/// Test that an out-of-range index leaves the prior override unchanged
#[tokio::test]
async fn test_out_of_range_selection_is_silently_ignored() {
    let (context, _backend) = fixture_context(FixtureBackend::with_tracks(stereo_movie_tracks()));
    context
        .get_audio_tracks(Some("fixture://movie.mkv".to_string()))
        .await
        .unwrap();
    context.set_audio_track(Some(1)).unwrap();
    let before = context.current_selection().unwrap();

    let result = context.set_audio_track(Some(99));

    assert!(result.is_ok(), "out-of-range selection must not error");
    assert_eq!(context.current_selection().unwrap(), before);
}

/// Test that a null group index errors without touching the selector
#[tokio::test]
async fn test_null_group_index_yields_invalid_argument() {
    let (context, _backend) = fixture_context(FixtureBackend::with_tracks(stereo_movie_tracks()));
    context
        .get_audio_tracks(Some("fixture://movie.mkv".to_string()))
        .await
        .unwrap();
    context.set_audio_track(Some(1)).unwrap();
    let before = context.current_selection().unwrap();

    match context.set_audio_track(None).unwrap_err() {
        PlayerError::InvalidArgument { what } => assert_eq!(what, "groupIndex"),
        other => panic!("Expected InvalidArgument, got {:?}", other),
    }
    assert_eq!(context.current_selection().unwrap(), before);
}

/// Test release semantics: repeated release is a no-op
#[tokio::test]
async fn test_release_twice_is_noop() {
    let (context, backend) = fixture_context(FixtureBackend::with_tracks(stereo_movie_tracks()));
    context
        .get_audio_tracks(Some("fixture://movie.mkv".to_string()))
        .await
        .unwrap();

    context.release_player().unwrap();
    context.release_player().unwrap();

    assert_eq!(backend.release_count(), 1);
    assert_eq!(context.is_session_active().unwrap(), false);
}

/// Test release with no session at all
#[test]
fn test_release_without_session_is_noop() {
    let (context, backend) = fixture_context(FixtureBackend::with_tracks(TrackList::default()));
    context.release_player().unwrap();
    assert_eq!(backend.release_count(), 0);
}

/// Test that a failing preparation resolves the call instead of hanging
#[tokio::test]
async fn test_preparation_failure_resolves_with_error() {
    let (context, _backend) = fixture_context(FixtureBackend::failing("unsupported container"));

    let result = context
        .get_audio_tracks(Some("fixture://broken.bin".to_string()))
        .await;

    match result.unwrap_err() {
        PlayerError::PreparationFailed { reason } => {
            assert!(reason.contains("unsupported container"));
        }
        other => panic!("Expected PreparationFailed, got {:?}", other),
    }
}

/// Test that a backend which never reports trips the discovery timeout
#[tokio::test]
async fn test_silent_backend_trips_discovery_timeout() {
    let config = AppConfig {
        discovery: DiscoveryConfig { timeout_ms: 50 },
        ..AppConfig::default()
    };
    let (context, _backend) = fixture_context_with_config(
        FixtureBackend::silent_for(Duration::from_secs(2)),
        config,
    );

    let result = context
        .get_audio_tracks(Some("fixture://stuck.mkv".to_string()))
        .await;

    match result.unwrap_err() {
        PlayerError::DiscoveryTimeout { timeout_ms } => assert_eq!(timeout_ms, 50),
        other => panic!("Expected DiscoveryTimeout, got {:?}", other),
    }
}

/// Test that duplicate notifications still deliver exactly one result
#[tokio::test]
async fn test_duplicate_notifications_deliver_single_result() {
    let (context, _backend) = fixture_context(
        FixtureBackend::with_tracks(stereo_movie_tracks()).notifying_twice(),
    );

    let tracks = context
        .get_audio_tracks(Some("fixture://noisy.mkv".to_string()))
        .await
        .unwrap();

    assert_eq!(tracks.len(), 3);
}

/// Test that a resource with no audio tracks yields an empty list
#[tokio::test]
async fn test_resource_without_audio_yields_empty_list() {
    let list = TrackList::new(vec![TrackGroup::new(
        TrackType::Video,
        vec![TrackFormat::default()],
    )]);
    let (context, _backend) = fixture_context(FixtureBackend::with_tracks(list));

    let tracks = context
        .get_audio_tracks(Some("fixture://silent-film.mkv".to_string()))
        .await
        .unwrap();

    assert!(tracks.is_empty());
    assert!(context.is_session_active().unwrap());
}
