// Player error types and constants

use crate::error::ErrorCode;
use flutter_rust_bridge::frb;
use log::error;
use std::fmt;

/// Player error code constants exposed to Dart via FFI
///
/// These constants provide a single source of truth for error codes
/// shared between Rust and Dart. The flutter_rust_bridge will automatically
/// generate corresponding Dart constants.
///
/// Error code range: 2001-2004
#[frb(unignore)]
pub struct PlayerErrorCodes {}

#[frb]
impl PlayerErrorCodes {
    /// A required argument was null or empty
    pub const INVALID_ARGUMENT: i32 = 2001;

    /// Track preparation failed (unsupported container, unreadable resource)
    pub const PREPARATION_FAILED: i32 = 2002;

    /// Track discovery did not complete within the configured timeout
    pub const DISCOVERY_TIMEOUT: i32 = 2003;

    /// Mutex/RwLock was poisoned
    pub const LOCK_POISONED: i32 = 2004;

    // Getter methods for FFI exposure (flutter_rust_bridge requires methods not const)

    /// Get INVALID_ARGUMENT error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn invalid_argument() -> i32 {
        Self::INVALID_ARGUMENT
    }

    /// Get PREPARATION_FAILED error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn preparation_failed() -> i32 {
        Self::PREPARATION_FAILED
    }

    /// Get DISCOVERY_TIMEOUT error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn discovery_timeout() -> i32 {
        Self::DISCOVERY_TIMEOUT
    }

    /// Get LOCK_POISONED error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn lock_poisoned() -> i32 {
        Self::LOCK_POISONED
    }
}

/// Log a player error with structured context
///
/// Logs the numeric error code alongside the failing operation so the
/// Dart side and native logs can be correlated.
pub fn log_player_error(err: &PlayerError, context: &str) {
    error!(
        "Player error in {}: code={}, component=PlayerSession, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Player-related errors
///
/// These errors cover the track discovery, selection, and release
/// operations of the player session.
///
/// Error code range: 2001-2004
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerError {
    /// A required argument was null or empty
    InvalidArgument { what: String },

    /// Track preparation failed before any tracks were reported
    PreparationFailed { reason: String },

    /// No tracks-changed notification arrived within the timeout
    DiscoveryTimeout { timeout_ms: u64 },

    /// Mutex/RwLock was poisoned
    LockPoisoned { component: String },
}

impl ErrorCode for PlayerError {
    fn code(&self) -> i32 {
        match self {
            PlayerError::InvalidArgument { .. } => PlayerErrorCodes::INVALID_ARGUMENT,
            PlayerError::PreparationFailed { .. } => PlayerErrorCodes::PREPARATION_FAILED,
            PlayerError::DiscoveryTimeout { .. } => PlayerErrorCodes::DISCOVERY_TIMEOUT,
            PlayerError::LockPoisoned { .. } => PlayerErrorCodes::LOCK_POISONED,
        }
    }

    fn message(&self) -> String {
        match self {
            PlayerError::InvalidArgument { what } => {
                format!("{} is null", what)
            }
            PlayerError::PreparationFailed { reason } => {
                format!("Track preparation failed: {}", reason)
            }
            PlayerError::DiscoveryTimeout { timeout_ms } => {
                format!("Track discovery timed out after {} ms", timeout_ms)
            }
            PlayerError::LockPoisoned { component } => {
                format!("Lock poisoned on {}", component)
            }
        }
    }
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PlayerError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for PlayerError {}
