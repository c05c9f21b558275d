// Voice Authenticity - AI-generated vs. human speech detection
// Audio decoding, acoustic feature extraction and scoring behind a small HTTP API

// Module declarations
pub mod analysis;
pub mod api;
pub mod audio;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod testing;

// Re-exports for convenience
pub use analysis::{ClassificationResult, DetectionPipeline, Label};
pub use config::AppConfig;

use tracing_subscriber::EnvFilter;

/// Install the global log subscriber
///
/// `RUST_LOG` selects verbosity (default `info`). Records emitted through the
/// `log` facade are forwarded as well. Output goes to stderr so command output
/// on stdout stays machine readable. Calling this twice is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
