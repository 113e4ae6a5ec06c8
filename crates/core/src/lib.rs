//! Latch core types and utilities
//!
//! Everything here is free of network I/O so it can be shared by the HTTP
//! client and the browser frontend alike.

pub mod config;
pub mod cookie;
pub mod error;
pub mod token;

pub use config::{AuthConfig, AuthOptions};
pub use cookie::{CookieJar, CookieOptions, Expires, MemoryCookieJar};
pub use error::{CoreError, CoreResult};
pub use token::AuthState;
