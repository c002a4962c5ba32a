//! Key-value persistence backends.
//!
//! The engine serializes `UserStats` itself and talks to storage
//! through the narrow [`KeyValueStore`] trait: opaque string blobs in,
//! opaque string blobs out. Load and save are the only suspension
//! points in the whole engine.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::PersistenceError;

/// The persistence collaborator: get/set of serialized blobs by key.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Fetches the blob stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Stores `value` under `key`, replacing any previous blob.
    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Returns `~/.config/fitquest[-dev]/` based on FITQUEST_ENV.
///
/// Set FITQUEST_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, PersistenceError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FITQUEST_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("fitquest-dev")
    } else {
        base_dir.join("fitquest")
    };

    std::fs::create_dir_all(&dir).map_err(|e| PersistenceError::DataDir(e.to_string()))?;
    Ok(dir)
}
