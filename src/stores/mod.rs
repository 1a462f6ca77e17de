//! Application state stores
//!
//! A store owns one slice of client state and exposes actions that change it.
//! Actions never return errors: a failure is recorded in the store's `error`
//! and reported to the caller as `false` / `None`.

mod auth;
mod tasks;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

pub use auth::AuthStore;
pub use tasks::{Column, TaskStore};

use crate::client::ApiError;

/// Loading flag and last error shared by every store
///
/// Loading is a count of in-flight actions so that overlapping actions keep
/// the flag raised until the last one finishes.
#[derive(Debug, Default)]
struct ActionState {
    in_flight: AtomicUsize,
    error: RwLock<Option<String>>,
}

impl ActionState {
    /// Start an action: raise loading and clear the previous error
    fn begin(&self) -> LoadingGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.set_error(None);
        LoadingGuard { state: self }
    }

    /// Record a failure, using `fallback` when the error has no message
    fn fail(&self, err: &ApiError, fallback: &str) {
        let message = if err.message().is_empty() { fallback } else { err.message() };
        self.set_error(Some(message.to_string()));
    }

    fn set_error(&self, error: Option<String>) {
        *self.error.write().unwrap_or_else(PoisonError::into_inner) = error;
    }

    fn error(&self) -> Option<String> {
        self.error.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Drop loading and error regardless of in-flight actions
    fn reset(&self) {
        self.in_flight.store(0, Ordering::SeqCst);
        self.set_error(None);
    }

    fn finish(&self) {
        // Saturating: reset() may already have zeroed the counter
        let _ = self
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| Some(n.saturating_sub(1)));
    }
}

/// Lowers the loading flag when an action ends, on every path
struct LoadingGuard<'a> {
    state: &'a ActionState,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.finish();
    }
}
