//! Error types for API clients.

use thiserror::Error;

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur when talking to an upstream HTTP API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself failed: connect/timeout/DNS/TLS, or any other
    /// transport-level error reqwest surfaces directly.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body didn't parse as the expected JSON shape.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The upstream responded with a non-2xx status.
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response parsed as valid JSON but was missing data this client
    /// requires (e.g. a directions response with no features).
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}
