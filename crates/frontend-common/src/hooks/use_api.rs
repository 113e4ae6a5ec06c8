//! Fetch-on-change data hook
//!
//! Every change of endpoint or client identity starts a new request
//! generation. Only the response of the current generation is applied, so a
//! slow stale response can no longer overwrite a newer one, and nothing is
//! written after the component unmounts.

use latch_http::ApiClient;
use serde::de::DeserializeOwned;
use std::fmt::Display;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Shown when a failure carries no message of its own
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Data, loading flag and error message of one fetch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> FetchState<T> {
    pub const fn loading() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    /// Whether this is the untouched loading state
    pub const fn is_pristine(&self) -> bool {
        self.loading && self.data.is_none() && self.error.is_none()
    }

    pub fn into_tuple(self) -> (Option<T>, bool, Option<String>) {
        (self.data, self.loading, self.error)
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::loading()
    }
}

/// Display text of `error`, or [`DEFAULT_ERROR_MESSAGE`] when it is empty
pub fn error_message(error: &impl Display) -> String {
    let message = error.to_string();
    if message.is_empty() {
        DEFAULT_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

/// Generation-tracked fetch state
#[derive(Debug)]
pub struct FetchTracker<T> {
    state: FetchState<T>,
    generation: u64,
    pending: Option<u64>,
}

impl<T> Default for FetchTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchTracker<T> {
    pub const fn new() -> Self {
        Self {
            state: FetchState::loading(),
            generation: 0,
            pending: None,
        }
    }

    pub const fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Start a request: reset to loading and return its generation
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.pending = Some(self.generation);
        self.state = FetchState::loading();
        self.generation
    }

    /// Apply the outcome of `generation`.
    ///
    /// Returns `false` and leaves the state alone when the generation was
    /// superseded, cancelled or already settled.
    pub fn settle<E: Display>(&mut self, generation: u64, result: Result<T, E>) -> bool {
        if self.pending != Some(generation) {
            tracing::debug!(generation, "Discarding stale response");
            return false;
        }

        self.pending = None;
        self.state = match result {
            Ok(data) => FetchState {
                data: Some(data),
                loading: false,
                error: None,
            },
            Err(error) => FetchState {
                data: None,
                loading: false,
                error: Some(error_message(&error)),
            },
        };
        true
    }

    /// Drop whatever request is in flight
    pub const fn cancel(&mut self) {
        self.pending = None;
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// GET `endpoint` through `client` whenever either changes
#[hook]
pub fn use_api<T>(endpoint: &str, client: &ApiClient) -> FetchState<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    let tracker = use_mut_ref(FetchTracker::<T>::new);
    let update = use_force_update();

    {
        let tracker = tracker.clone();
        use_effect_with(
            (endpoint.to_string(), client.clone()),
            move |(endpoint, client)| {
                let needs_render = !tracker.borrow().state().is_pristine();
                let generation = tracker.borrow_mut().begin();
                if needs_render {
                    update.force_update();
                }

                {
                    let tracker = tracker.clone();
                    let endpoint = endpoint.clone();
                    let client = client.clone();
                    spawn_local(async move {
                        let result = client.get::<T>(&endpoint).await;
                        if tracker.borrow_mut().settle(generation, result) {
                            update.force_update();
                        }
                    });
                }

                move || tracker.borrow_mut().cancel()
            },
        );
    }

    let state = tracker.borrow().state().clone();
    state
}
