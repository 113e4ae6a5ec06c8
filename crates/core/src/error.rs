//! Core error types

use thiserror::Error;

/// Standard result type for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors raised while loading configuration or handling cookies
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cookie jar unavailable: {message}")]
    CookieJarUnavailable { message: String },
}

impl CoreError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a cookie jar error
    pub fn cookie_jar(message: impl Into<String>) -> Self {
        Self::CookieJarUnavailable {
            message: message.into(),
        }
    }
}
