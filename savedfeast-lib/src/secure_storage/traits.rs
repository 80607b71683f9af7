//! Core trait for secure credential storage.

use std::fmt;

use async_trait::async_trait;

/// Error codes for credential storage operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum StorageErrorCode {
    /// Key not found
    NotFound = 1000,
    /// Access denied by the platform store
    AccessDenied = 2000,
    /// Storage is locked
    StorageLocked = 2001,
    /// Invalid key format
    InvalidKey = 4000,
    /// I/O failure in the backing store
    Io = 5000,
    /// Platform not supported
    Unsupported = 6000,
    /// Internal error
    Internal = 9999,
}

/// Error type for credential storage operations.
#[derive(Debug)]
pub struct StorageError {
    /// Error code for FFI/mobile integration
    pub code: StorageErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Key related to the error (if applicable)
    pub key: Option<String>,
}

impl StorageError {
    /// Create a new error.
    pub fn new(code: StorageErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            key: None,
        }
    }

    /// Create a new error with an associated key.
    pub fn with_key(
        code: StorageErrorCode,
        message: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Create an I/O error for a key.
    pub fn io(key: impl Into<String>, err: std::io::Error) -> Self {
        Self::with_key(StorageErrorCode::Io, err.to_string(), key)
    }

    /// Create an "invalid key" error.
    pub fn invalid_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            code: StorageErrorCode::InvalidKey,
            message: format!("Invalid storage key: {}", key),
            key: Some(key),
        }
    }

    /// Check if this error indicates the key wasn't found.
    pub fn is_not_found(&self) -> bool {
        self.code == StorageErrorCode::NotFound
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(key) = &self.key {
            write!(f, "{} (key: {})", self.message, key)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for credential storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Platform-agnostic credential storage.
///
/// Implementations back this with whatever the platform offers: the OS
/// keychain on mobile, a file in the app's data directory on desktop, or
/// plain memory in tests. Implementations should never log or expose the
/// stored values.
///
/// This trait only promises string-in/string-out for a small fixed set of
/// keys; it is not a general key-value database.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Retrieve a value by key. `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store a value, overwriting any existing one.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}
