//! Error types for the Film Fusion SDK.

use thiserror::Error;

/// Primary error type for all Film Fusion operations.
#[derive(Error, Debug)]
pub enum FusionError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Backend rejected the request via the `{code, message, data}` envelope.
    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    /// Non-2xx HTTP response outside the envelope convention.
    #[error("HTTP error (status {status}): {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl FusionError {
    /// Map a non-2xx HTTP status and body into an error.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        match status {
            401 | 403 => Self::Authentication(body.into()),
            _ => Self::Http {
                status,
                message: body.into(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, FusionError>;
