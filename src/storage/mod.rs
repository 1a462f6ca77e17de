//! Durable key-value storage for the session
//!
//! The client persists exactly two keys across runs:
//! - [`TOKEN_KEY`]: the bearer token (plain string)
//! - [`USER_KEY`]: the logged-in user (JSON)
//!
//! Backends:
//! - `file`: a JSON object on disk (default for the CLI)
//! - `memory`: process-local map (tests, embedding)

mod file;
mod memory;

use std::fmt::Debug;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-serialized user
pub const USER_KEY: &str = "user";

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistent string key-value storage shared by the whole process
///
/// Values are either present or absent; there is no expiry.
pub trait Storage: Debug + Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove several keys, stopping at the first failure
    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}
