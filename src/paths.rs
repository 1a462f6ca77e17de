//! Centralized path definitions for taskboard
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.taskboard/
//! ├── config.toml               # API URL, storage overrides
//! └── session.json              # Durable session (token, user)
//! ```

use std::path::PathBuf;

/// Global directory name
const GLOBAL_DIR: &str = ".taskboard";

/// Global config filename
const CONFIG_FILE: &str = "config.toml";

/// Default session storage filename
const SESSION_FILE: &str = "session.json";

/// Get the global taskboard directory.
///
/// Returns `~/.taskboard/`.
#[must_use]
pub fn global_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the config file path.
///
/// Returns `~/.taskboard/config.toml`.
#[must_use]
pub fn config_file() -> PathBuf {
    global_dir().join(CONFIG_FILE)
}

/// Get the default session storage path.
///
/// Returns `~/.taskboard/session.json`.
/// Holds the bearer token and the logged-in user between runs.
#[must_use]
pub fn session_file() -> PathBuf {
    global_dir().join(SESSION_FILE)
}
