//! File-backed credential storage implementation.
//!
//! Stores each key as its own file under a base directory. Intended for
//! desktop and development targets without a platform keychain; mobile
//! targets should implement [`CredentialStore`] over the OS keystore
//! instead.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::traits::{CredentialStore, StorageError, StorageErrorCode, StorageResult};

/// File-per-key implementation of [`CredentialStore`].
pub struct FileCredentialStore {
    base_path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store rooted at `base_path`, creating the directory if
    /// needed.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path)
            .map_err(|e| StorageError::new(StorageErrorCode::Io, e.to_string()))?;
        Ok(Self { base_path })
    }

    /// Base directory this store writes under.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn entry_path(&self, key: &str) -> StorageResult<PathBuf> {
        // Keys are fixed identifiers, not user input, but refuse anything
        // that could traverse outside the base directory.
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(StorageError::invalid_key(key));
        }
        Ok(self.base_path.join(format!("{}.cred", key)))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.entry_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.entry_path(key)?;
        std::fs::write(&path, value).map_err(|e| StorageError::io(key, e))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.entry_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path()).unwrap();

        store.set("auth_token", "secret").await.unwrap();
        assert_eq!(
            store.get("auth_token").await.unwrap(),
            Some("secret".into())
        );

        store.delete("auth_token").await.unwrap();
        assert_eq!(store.get("auth_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_key_reads_none() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path()).unwrap();
        assert_eq!(store.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path()).unwrap();
        store.delete("absent").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_traversal_keys() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path()).unwrap();

        let err = store.get("../escape").await.unwrap_err();
        assert_eq!(err.code, StorageErrorCode::InvalidKey);

        let err = store.set("a/b", "x").await.unwrap_err();
        assert_eq!(err.code, StorageErrorCode::InvalidKey);
    }

    #[tokio::test]
    async fn test_persists_across_instances() {
        let dir = tempdir().unwrap();
        {
            let store = FileCredentialStore::new(dir.path()).unwrap();
            store.set("user", r#"{"id":1}"#).await.unwrap();
        }
        let store = FileCredentialStore::new(dir.path()).unwrap();
        assert_eq!(store.get("user").await.unwrap(), Some(r#"{"id":1}"#.into()));
    }
}
