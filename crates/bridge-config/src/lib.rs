//! Configuration and logging setup for the Alexa HA bridge.
//!
//! Everything here is resolved once at startup and read-only afterwards.
//! A missing or unparseable base URL is fatal: the process must not serve
//! a single directive without knowing where the backend lives.

mod config;
mod error;
mod logging;

pub use config::Config;
pub use error::{ConfigError, ConfigResult};
pub use logging::init_logging;
