//! Remote API client
//!
//! Layers, leaves first:
//! - [`HttpClient`]: request building, bearer auth, error normalisation
//! - [`AuthApi`] / [`TasksApi`]: one method per endpoint, no logic
//!
//! All failures are [`ApiError`]s carrying a message and a status code.

mod auth;
mod error;
mod http;
mod tasks;

pub use auth::AuthApi;
pub use error::{ApiError, FALLBACK_MESSAGE, TRANSPORT_STATUS, message_from_body};
pub use http::{DEFAULT_API_URL, HttpClient, UnauthorizedListener};
pub use tasks::TasksApi;
