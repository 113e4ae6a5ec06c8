//! Custom hooks

pub mod use_api;

pub use use_api::{FetchState, FetchTracker, error_message, use_api};
