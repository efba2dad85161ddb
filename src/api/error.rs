//! Transport error classification.
//!
//! Every variant maps to a status code so it can be folded into an
//! [`Envelope`](super::Envelope) without the caller ever seeing the error.

use thiserror::Error;

/// Errors raised while talking to the REST backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Base URL plus path did not form a valid URL
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Network-level failure reaching the backend
    #[error("Connection failed to '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded total timeout
    #[error("Request timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Response body could not be read or decoded
    #[error("Invalid response body: {0}")]
    Body(String),

    /// Request body could not be encoded
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    /// Status code reported in the envelope for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Timeout { .. } => 504,
            ApiError::Connection { .. } => 502,
            ApiError::ClientBuild(_)
            | ApiError::InvalidUrl { .. }
            | ApiError::Body(_)
            | ApiError::Encode(_) => 500,
        }
    }

    /// Short machine-readable name, used in logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::ClientBuild(_) => "client_build",
            ApiError::InvalidUrl { .. } => "invalid_url",
            ApiError::Connection { .. } => "connection_error",
            ApiError::Timeout { .. } => "request_timeout",
            ApiError::Body(_) => "invalid_body",
            ApiError::Encode(_) => "encode_error",
        }
    }
}
