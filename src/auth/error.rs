use thiserror::Error;

use crate::error::FusionError;

/// Normalized errors for the 115 QR authorization flow.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Authorization not confirmed")]
    NotConfirmed,
    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },
    #[error("HTTP error (status {status}): {message}")]
    Http { status: u16, message: String },
    #[error("Unknown authorization status: {0}")]
    UnknownStatus(i64),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<std::io::Error> for AuthError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<toml::de::Error> for AuthError {
    fn from(error: toml::de::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<toml::ser::Error> for AuthError {
    fn from(error: toml::ser::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<AuthError> for FusionError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Api { code, message } => FusionError::Api { code, message },
            AuthError::Http { status, message } => FusionError::Http { status, message },
            AuthError::MissingField(field) => {
                FusionError::InvalidArgument(format!("missing required field: {field}"))
            }
            other => FusionError::Authentication(other.to_string()),
        }
    }
}
