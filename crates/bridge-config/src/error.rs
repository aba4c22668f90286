//! Configuration error types.

use thiserror::Error;

/// Errors raised while resolving startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required BASE_URL variable is missing or empty
    #[error("BASE_URL environment variable must be set")]
    MissingBaseUrl,

    /// BASE_URL is present but not a valid URL
    #[error("Invalid BASE_URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// Global tracing subscriber could not be installed
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

/// Result type alias using ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;
