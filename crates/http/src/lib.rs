//! Latch HTTP layer
//!
//! [`client::ApiClient`] wraps `reqwest` and attaches the bearer token;
//! [`auth`] implements login and logout on top of it.

pub mod auth;
pub mod client;
pub mod types;

pub use auth::{AuthError, PendingLogout, begin_logout, login, logout};
pub use client::ApiClient;
pub use client::error::ClientError;
