//! Authentication token state

use serde::{Deserialize, Serialize};

/// Whether a token is currently held
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthState {
    Authenticated {
        token: String,
    },
    #[default]
    Anonymous,
}

impl AuthState {
    /// Build a state from an optional token. Empty tokens count as absent.
    pub fn from_token(token: Option<String>) -> Self {
        match token {
            Some(token) if !token.is_empty() => Self::Authenticated { token },
            _ => Self::Anonymous,
        }
    }

    /// The held token, if any
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token } => Some(token),
            Self::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

impl From<Option<String>> for AuthState {
    fn from(token: Option<String>) -> Self {
        Self::from_token(token)
    }
}
