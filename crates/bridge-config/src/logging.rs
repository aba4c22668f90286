//! Logging initialization for the bridge.

use crate::{ConfigError, ConfigResult};
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Production runs emit structured JSON lines; debug mode switches to a
/// human-readable development format, mirroring the production/development
/// logger split of the original deployment. `RUST_LOG` overrides the default
/// level either way.
///
/// Fails if a global subscriber is already installed; callers treat that as
/// fatal at startup.
pub fn init_logging(debug: bool) -> ConfigResult<()> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = if debug {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
    };

    result.map_err(|e| ConfigError::Logging(e.to_string()))
}
