//! File-backed key-value store.
//!
//! One JSON document per key under the data directory. Writes go
//! through a temp file and rename so a crash mid-write never leaves a
//! truncated document behind.

use std::path::PathBuf;

use crate::error::PersistenceError;

use super::{data_dir, KeyValueStore};

/// Stores each key as `<dir>/<key>.json`.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens the store in the default data directory.
    pub fn open() -> Result<Self, PersistenceError> {
        Ok(Self { dir: data_dir()? })
    }

    /// Opens the store in a custom directory (used by tests).
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::with_dir(dir.path().to_path_buf());
        assert_eq!(store.get("user_stats").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::with_dir(dir.path().to_path_buf());

        store.set("user_stats", r#"{"total_xp":10}"#).await.unwrap();
        let raw = store.get("user_stats").await.unwrap().unwrap();
        assert_eq!(raw, r#"{"total_xp":10}"#);
    }

    #[tokio::test]
    async fn test_set_replaces_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::with_dir(dir.path().to_path_buf());

        store.set("k", "first").await.unwrap();
        store.set("k", "second").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().unwrap(), "second");
    }
}
