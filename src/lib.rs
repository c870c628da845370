//! In-memory poll store
//!
//! Create a poll with a question and a fixed set of options, cast votes
//! restricted to those options, and read back aggregated vote counts.

pub mod api;
pub mod config;
pub mod errors;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use errors::{Error, ErrorCode, Result};
pub use service::PollService;
pub use store::PollStore;
pub use types::{CreatePollRequest, OptionCount, Poll, PollId};

use config::LoggingConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the `RUST_LOG` filter, defaulting to `poll=info`
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "poll=info".into()),
        )
        .try_init()
        .map_err(|e| Error::internal(format!("Failed to initialize logging: {e}")))?;

    tracing::info!("📊 Poll store v{} initialized", VERSION);
    Ok(())
}

/// Initialize logging from configuration
pub fn init_with(logging: &LoggingConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_new(format!("poll={}", logging.level))
        .map_err(|e| Error::internal(format!("Invalid log level {}: {e}", logging.level)))?;

    let installed = if logging.is_json() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .try_init()
    };
    installed.map_err(|e| Error::internal(format!("Failed to initialize logging: {e}")))?;

    tracing::info!("📊 Poll store v{} initialized", VERSION);
    Ok(())
}
