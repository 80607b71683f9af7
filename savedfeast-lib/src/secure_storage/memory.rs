//! In-memory credential storage implementation.
//!
//! Useful for tests and for ephemeral sessions that should not outlive the
//! process. Values are not encrypted.
//!
//! # Thread Safety
//!
//! This store uses `RwLock` for thread-safe access. Lock poisoning is
//! handled gracefully by returning an error rather than panicking.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::traits::{CredentialStore, StorageError, StorageErrorCode, StorageResult};

/// In-memory implementation of [`CredentialStore`].
#[derive(Default)]
pub struct MemoryCredentialStore {
    values: RwLock<HashMap<String, String>>,
}

fn lock_error(context: &str) -> StorageError {
    StorageError::new(
        StorageErrorCode::Internal,
        format!("MemoryCredentialStore: lock poisoned during {}", context),
    )
}

impl MemoryCredentialStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries. Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.values.read().map(|v| v.len()).unwrap_or(0)
    }

    /// Check if the store is empty. Returns true if the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.values.read().map(|v| v.is_empty()).unwrap_or(true)
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let values = self.values.read().map_err(|_| lock_error("get"))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut values = self.values.write().map_err(|_| lock_error("set"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let mut values = self.values.write().map_err(|_| lock_error("delete"))?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryCredentialStore::new();
        store.set("token", "abc123").await.unwrap();

        assert_eq!(store.get("token").await.unwrap(), Some("abc123".into()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_overwrite() {
        let store = MemoryCredentialStore::new();
        store.set("token", "first").await.unwrap();
        store.set("token", "second").await.unwrap();

        assert_eq!(store.get("token").await.unwrap(), Some("second".into()));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryCredentialStore::new();
        store.set("token", "abc").await.unwrap();

        store.delete("token").await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), None);

        // Deleting again is not an error.
        store.delete("token").await.unwrap();
        assert!(store.is_empty());
    }
}
