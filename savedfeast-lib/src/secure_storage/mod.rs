//! Secure storage for the session credentials.
//!
//! Two layers:
//!
//! - [`CredentialStore`] is the platform seam: async get/set/delete over an
//!   OS keychain, a file, or memory.
//! - [`SessionVault`] owns the two fixed keys this client persists (the
//!   bearer token and the cached user JSON) and enforces the never-throw
//!   contract: reads degrade to `None` and writes/deletes are best-effort,
//!   with failures logged rather than surfaced.

mod file;
mod memory;
mod traits;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;
pub use traits::{CredentialStore, StorageError, StorageErrorCode, StorageResult};

use std::sync::Arc;

use crate::auth::User;

/// Storage key for the bearer token.
const TOKEN_KEY: &str = "savedfeast.auth_token";

/// Storage key for the cached user JSON.
const USER_KEY: &str = "savedfeast.user";

/// Owner of the persisted session state.
///
/// A storage failure must never break an API call or a logout, so every
/// method here absorbs [`StorageError`]s: `token()`/`cached_user()` return
/// `None`, the writers and `clear()` are no-ops on failure. Failures are
/// logged at `warn`.
pub struct SessionVault {
    store: Arc<dyn CredentialStore>,
}

impl SessionVault {
    /// Create a vault over the given credential store.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Read the stored bearer token.
    pub async fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("token read failed: {}", e);
                None
            }
        }
    }

    /// True iff a bearer token is readable. Storage errors read as false.
    pub async fn has_token(&self) -> bool {
        self.token().await.is_some()
    }

    /// Persist the bearer token.
    pub async fn store_token(&self, token: &str) {
        if let Err(e) = self.store.set(TOKEN_KEY, token).await {
            tracing::warn!("token write failed: {}", e);
        }
    }

    /// Read and parse the cached user, if any.
    pub async fn cached_user(&self) -> Option<User> {
        let raw = match self.store.get(USER_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("cached user read failed: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("cached user is not valid JSON: {}", e);
                None
            }
        }
    }

    /// Persist the user snapshot.
    pub async fn store_user(&self, user: &User) {
        let raw = match serde_json::to_string(user) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("user serialization failed: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(USER_KEY, &raw).await {
            tracing::warn!("cached user write failed: {}", e);
        }
    }

    /// Persist both halves of a fresh session.
    pub async fn store_session(&self, token: &str, user: &User) {
        self.store_token(token).await;
        self.store_user(user).await;
    }

    /// Delete the token and the cached user, each best-effort.
    pub async fn clear(&self) {
        if let Err(e) = self.store.delete(TOKEN_KEY).await {
            tracing::warn!("token delete failed: {}", e);
        }
        if let Err(e) = self.store.delete(USER_KEY).await {
            tracing::warn!("cached user delete failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn test_user() -> User {
        User {
            id: 7,
            first_name: "Maya".into(),
            last_name: "Osei".into(),
            email: "maya@example.com".into(),
            phone: None,
            address: None,
            roles: None,
        }
    }

    /// A store whose every operation fails.
    struct BrokenStore;

    #[async_trait]
    impl CredentialStore for BrokenStore {
        async fn get(&self, key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::with_key(
                StorageErrorCode::StorageLocked,
                "locked",
                key,
            ))
        }
        async fn set(&self, key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::with_key(
                StorageErrorCode::StorageLocked,
                "locked",
                key,
            ))
        }
        async fn delete(&self, key: &str) -> StorageResult<()> {
            Err(StorageError::with_key(
                StorageErrorCode::StorageLocked,
                "locked",
                key,
            ))
        }
    }

    #[tokio::test]
    async fn test_session_roundtrip() {
        let vault = SessionVault::new(Arc::new(MemoryCredentialStore::new()));

        assert!(!vault.has_token().await);
        vault.store_session("tok-1", &test_user()).await;

        assert_eq!(vault.token().await, Some("tok-1".into()));
        assert_eq!(vault.cached_user().await.unwrap().email, "maya@example.com");

        vault.clear().await;
        assert!(!vault.has_token().await);
        assert!(vault.cached_user().await.is_none());
    }

    #[tokio::test]
    async fn test_broken_store_never_panics() {
        let vault = SessionVault::new(Arc::new(BrokenStore));

        // Reads degrade to None, writes and deletes are no-ops.
        assert_eq!(vault.token().await, None);
        assert!(!vault.has_token().await);
        assert!(vault.cached_user().await.is_none());
        vault.store_session("tok", &test_user()).await;
        vault.clear().await;
    }

    #[tokio::test]
    async fn test_corrupt_cached_user_reads_none() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.set(USER_KEY, "{not json").await.unwrap();

        let vault = SessionVault::new(store);
        assert!(vault.cached_user().await.is_none());
    }
}
