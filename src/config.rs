//! Configuration management for the track bridge
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling tuning without recompilation. The discovery timeout and probe
//! I/O buffer size can be adjusted via the config file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub discovery: DiscoveryConfig,
    pub probe: ProbeConfig,
}

/// Track discovery parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Upper bound on how long a discovery call may wait for the first
    /// tracks-changed notification, in milliseconds
    pub timeout_ms: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self { timeout_ms: 10_000 }
    }
}

/// Container probe parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Read buffer size for the media source stream, in bytes
    pub io_buffer_len: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            io_buffer_len: 64 * 1024,
        }
    }
}

impl Default for AppConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            discovery: DiscoveryConfig::default(),
            probe: ProbeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` - Loaded configuration
    /// * `Err` - If file doesn't exist or JSON is invalid, returns default config
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from Android assets directory
    ///
    /// Asset access goes through the Android AssetManager which is not
    /// reachable from here, so Android builds run on defaults.
    #[cfg(target_os = "android")]
    pub fn load_android() -> Self {
        log::info!("[Config] Using default configuration on Android");
        Self::default()
    }

    /// Load configuration for non-Android platforms
    #[cfg(not(target_os = "android"))]
    pub fn load() -> Self {
        Self::load_from_file("assets/media_tracks.json")
    }
}
