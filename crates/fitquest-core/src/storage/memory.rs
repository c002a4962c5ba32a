//! In-memory key-value store for tests and embedding hosts that
//! manage persistence themselves.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::PersistenceError;

use super::KeyValueStore;

#[derive(Default)]
struct Inner {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

/// `Mutex<HashMap>` backend. Clones share the same state, so a test
/// can hand one handle to a store and keep another for inspection.
/// The failure switches exercise the degraded load/save paths.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a key, bypassing the trait (for corrupt-data tests).
    pub fn seed(&self, key: &str, value: &str) {
        self.inner
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Makes every subsequent `set` call fail.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `get` call fail.
    pub fn fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(PersistenceError::Backend(
                "injected read failure".to_string(),
            ));
        }
        Ok(self.inner.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Backend(
                "injected write failure".to_string(),
            ));
        }
        self.inner
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip() {
        let store = MemoryStore::new();
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().unwrap(), "v");
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().unwrap(), "v");
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        assert!(store.set("k", "v").await.is_err());

        store.fail_writes(false);
        store.set("k", "v").await.unwrap();
        store.fail_reads(true);
        assert!(store.get("k").await.is_err());
    }
}
