//! Errors raised while talking to the auth API

use thiserror::Error;

/// Failure of a single API request, classified by HTTP status where possible
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure before a status was received
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Any other non-success status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Server rejected the credentials or token
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Endpoint does not exist on the API
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Server rejected the request body
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Token valid but not allowed for this endpoint
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Response body was not the expected JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client could not be built from the given options
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Map a non-success status and its body text to a variant
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
}
