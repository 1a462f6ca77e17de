//! Global configuration management
//!
//! Config is stored at `~/.taskboard/config.toml`:
//!
//! ```toml
//! [api]
//! url = "http://localhost:5000"
//!
//! [storage]
//! path = "/home/me/.taskboard/session.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_API_URL;
use crate::paths;

/// Global taskboard configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Session storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the task API
    #[serde(default = "default_api_url")]
    pub url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
        }
    }
}

/// Session storage settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Session file; defaults to `~/.taskboard/session.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Get the config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::config_file()
    }

    /// Load config from disk, or defaults if missing or unreadable
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from a specific file
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path).map(|content| toml::from_str(&content)) {
            Ok(Ok(config)) => config,
            Ok(Err(e)) => {
                log::warn!("Ignoring invalid config {}: {e}", path.display());
                Self::default()
            },
            Err(e) => {
                log::warn!("Failed to read config {}: {e}", path.display());
                Self::default()
            },
        }
    }

    /// Save config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Where the session is persisted
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.storage.path.clone().unwrap_or_else(paths::session_file)
    }

    /// Replace the API URL
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api.url = url.into();
        self
    }
}
