//! Client error types

use thiserror::Error;
use volant_core::CoreError;

/// Client error types
///
/// Transport failures are split into [`ClientError::Network`] and
/// [`ClientError::Timeout`]; construct them through
/// [`ClientError::from_reqwest`] so a deadline miss is never reported as a
/// generic network failure.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request never produced a usable response
    #[error("Request failed: {0}")]
    Network(reqwest::Error),

    /// Request deadline exceeded
    #[error("Request timed out: {0}")]
    Timeout(reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Endpoint answered 2xx but reported failure in the response envelope
    #[error("API error: {0}")]
    Api(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Credential store failure
    #[error("Credential store error: {0}")]
    Store(#[from] CoreError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Classify a transport error, keeping timeouts distinct
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else if err.is_builder() {
            Self::Configuration(err.to_string())
        } else {
            Self::Network(err)
        }
    }

    /// Whether this error means the session is no longer authenticated
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
