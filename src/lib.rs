// Media Tracks Core - Rust side of the audio track bridge
// Track discovery and selection over a playback-preparation engine

// Module declarations
pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod managers;
pub mod player;
pub mod testing;

// Re-exports for convenience
pub use api::*;

use std::sync::Once;

static LOGGING: Once = Once::new();

/// Install the tracing subscriber once per process
#[cfg(target_os = "android")]
pub(crate) fn init_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    LOGGING.call_once(|| {
        match tracing_android::layer("MediaTracks") {
            Ok(layer) => {
                let _ = tracing_subscriber::registry().with(layer).try_init();
            }
            Err(err) => eprintln!("failed to initialize Android logging: {}", err),
        }
        log::info!("[MediaTracks] logging initialized");
    });
}

#[cfg(not(target_os = "android"))]
pub(crate) fn init_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
        log::info!("[MediaTracks] logging initialized");
    });
}
