//! taskboard - client library for a remote task board API
//!
//! This library provides the request layer (bearer-authenticated JSON over
//! HTTP), the authentication and task stores built on it, and the routing
//! and notification pieces that react to an expired session.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod client;
pub mod config;
pub mod models;
pub mod notify;
pub mod output;
pub mod paths;
pub mod router;
pub mod session;
pub mod storage;
pub mod stores;
