//! Transport error types.

use thiserror::Error;

/// Errors raised while building the backend HTTP client.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Client construction failed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// Tunnel proxy address rejected by the client builder
    #[error("Invalid tunnel proxy address: {0}")]
    Proxy(String),
}

/// Result type alias using TransportError.
pub type TransportResult<T> = Result<T, TransportError>;
