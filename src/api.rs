// Public API for flutter_rust_bridge integration
// This module provides FFI functions for Flutter to inspect and select
// audio tracks through the Rust player session

#![allow(dead_code)] // FFI functions are called from Dart, not detected by Rust analyzer

use anyhow::Result;
use once_cell::sync::Lazy;

use crate::context::AppContext;
use crate::error::PlayerError;

// Re-export FFI-visible types
pub use crate::error::PlayerErrorCodes;
pub use crate::player::tracks::AudioTrack;

/// Global AppContext instance - single dependency injection container
///
/// Consolidates the backend, configuration, and the at-most-one player
/// session behind the bridge functions.
static APP_CONTEXT: Lazy<AppContext> = Lazy::new(AppContext::new);

/// Initialize native-side logging
///
/// Installs the tracing subscriber. Dart calls this once at startup;
/// repeated calls are harmless.
#[flutter_rust_bridge::frb(sync)]
pub fn init_app() {
    crate::init_logging();
}

/// Get the version of the track bridge
///
/// # Returns
///
/// * `Result<String>` - Version string
#[flutter_rust_bridge::frb(sync)]
pub fn get_version() -> Result<String> {
    Ok(env!("CARGO_PKG_VERSION").to_string())
}

/// Discover the audio tracks of a playable resource
///
/// Builds a fresh player session for `path` (replacing and releasing any
/// prior session), waits for the first tracks-changed notification, and
/// returns one descriptor per elementary audio track in stable
/// (group index, track index) order. The session stays prepared
/// afterwards, pending `set_audio_track` or `release_player`.
///
/// # Arguments
/// * `path` - Local path or file URI of the resource; null fails fast
///
/// # Returns
/// * `Ok(Vec<AudioTrack>)` - Ordered audio track descriptors
/// * `Err(PlayerError)` - Error if the argument or preparation fails
///
/// # Errors
/// - Path is null or empty (no player is constructed)
/// - The resource cannot be opened or its container is unsupported
/// - No track metadata arrives within the configured timeout
/// - Lock poisoning on the session slot
#[flutter_rust_bridge::frb]
pub async fn get_audio_tracks(path: Option<String>) -> Result<Vec<AudioTrack>, PlayerError> {
    APP_CONTEXT.get_audio_tracks(path).await
}

/// Restrict audio output to a previously reported track group
///
/// Clears any existing audio override and commits a new one pinning the
/// group to its first sub-track. Synchronous and idempotent; an index
/// beyond the groups reported by the latest discovery is ignored.
///
/// # Arguments
/// * `group_index` - Zero-based group index from `get_audio_tracks`;
///   null fails fast
///
/// # Returns
/// * `Ok(())` - Override committed (or out-of-range index ignored)
/// * `Err(PlayerError)` - Error if the argument is null or lock poisoning
#[flutter_rust_bridge::frb]
pub fn set_audio_track(group_index: Option<u32>) -> Result<(), PlayerError> {
    APP_CONTEXT.set_audio_track(group_index)
}

/// Tear down the current player session
///
/// Releases decoder and resource handles and drops the selector. Safe to
/// call when no session exists. The Flutter shell calls this from its
/// activity-teardown hook so no native resources outlive the activity.
///
/// # Returns
/// * `Ok(())` - Session released or nothing to release
/// * `Err(PlayerError)` - Lock poisoning on the session slot
#[flutter_rust_bridge::frb]
pub fn release_player() -> Result<(), PlayerError> {
    APP_CONTEXT.release_player()
}

/// Get PlayerErrorCodes as a structured object with all error code constants
#[flutter_rust_bridge::frb(sync)]
pub fn get_player_error_codes() -> PlayerErrorCodes {
    PlayerErrorCodes {}
}
