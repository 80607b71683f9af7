//! Error types for SavedFeast client operations.
//!
//! This module provides structured error types for the SavedFeast library,
//! enabling precise error handling and recovery strategies. Every service
//! method returns these errors; raw HTTP errors never escape the client
//! layer.

use std::fmt;

/// Error codes for FFI and mobile integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SavedFeastErrorCode {
    /// Transport/network layer error
    Transport = 2000,
    /// Connection failed
    ConnectionFailed = 2001,
    /// Connection timeout
    ConnectionTimeout = 2002,
    /// Authentication error (HTTP 401)
    Auth = 3000,
    /// Session expired
    SessionExpired = 3001,
    /// Authorization refused (HTTP 403)
    Forbidden = 3002,
    /// Resource not found (HTTP 404)
    NotFound = 4000,
    /// Validation failed (HTTP 422)
    Validation = 5001,
    /// Serialization error
    Serialization = 5002,
    /// Business-rule rejection (HTTP 400)
    Rejected = 6000,
    /// Credential storage error
    Storage = 7000,
    /// Rate limited (HTTP 429)
    RateLimited = 8000,
    /// Server-side failure (HTTP 5xx)
    Server = 9000,
    /// Internal/unexpected error
    Internal = 9999,
}

/// Comprehensive error type for SavedFeast client operations.
#[derive(Debug, Clone)]
pub enum SavedFeastError {
    /// Transport/network layer error.
    Transport(String),

    /// Connection failed.
    ConnectionFailed {
        /// Target endpoint or host
        target: String,
        /// Underlying error message
        reason: String,
    },

    /// Connection or race timeout.
    ConnectionTimeout {
        /// Operation that timed out
        operation: String,
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Authentication failed (HTTP 401). Fatal to the stored session.
    Auth(String),

    /// Session expired, needs re-authentication.
    SessionExpired,

    /// Authorization refused (HTTP 403).
    Forbidden(String),

    /// Resource not found (HTTP 404).
    NotFound {
        /// Resource description or server message (e.g., "order 42")
        resource: String,
    },

    /// Validation failed (HTTP 422). The message is all field-level
    /// messages joined with `", "`.
    Validation(String),

    /// Business-rule rejection (HTTP 400), server message verbatim.
    Rejected(String),

    /// Rate limited, should retry after delay.
    RateLimited {
        /// Suggested retry delay in milliseconds
        retry_after_ms: u64,
    },

    /// Server-side failure (HTTP 5xx).
    Server {
        /// HTTP status code
        status: u16,
        /// Server message, if any
        message: String,
    },

    /// Serialization/deserialization error.
    Serialization(String),

    /// Credential storage operation failed.
    Storage(String),

    /// Internal/unexpected error.
    Internal(String),
}

impl SavedFeastError {
    /// Get the error code for FFI/mobile integration.
    pub fn code(&self) -> SavedFeastErrorCode {
        match self {
            Self::Transport(_) => SavedFeastErrorCode::Transport,
            Self::ConnectionFailed { .. } => SavedFeastErrorCode::ConnectionFailed,
            Self::ConnectionTimeout { .. } => SavedFeastErrorCode::ConnectionTimeout,
            Self::Auth(_) => SavedFeastErrorCode::Auth,
            Self::SessionExpired => SavedFeastErrorCode::SessionExpired,
            Self::Forbidden(_) => SavedFeastErrorCode::Forbidden,
            Self::NotFound { .. } => SavedFeastErrorCode::NotFound,
            Self::Validation(_) => SavedFeastErrorCode::Validation,
            Self::Serialization(_) => SavedFeastErrorCode::Serialization,
            Self::Rejected(_) => SavedFeastErrorCode::Rejected,
            Self::Storage(_) => SavedFeastErrorCode::Storage,
            Self::RateLimited { .. } => SavedFeastErrorCode::RateLimited,
            Self::Server { .. } => SavedFeastErrorCode::Server,
            Self::Internal(_) => SavedFeastErrorCode::Internal,
        }
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true if this error is potentially recoverable by retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::ConnectionFailed { .. }
                | Self::ConnectionTimeout { .. }
                | Self::RateLimited { .. }
                | Self::Server { .. }
                | Self::Storage(_)
        )
    }

    /// Returns true for the error classes the retry policy must never
    /// re-attempt: authentication, authorization, and missing resources.
    pub fn is_non_retryable(&self) -> bool {
        matches!(
            self,
            Self::Auth(_) | Self::SessionExpired | Self::Forbidden(_) | Self::NotFound { .. }
        )
    }

    /// Returns true for network-level failures (no response reached us).
    ///
    /// The session manager keys its cached-user fallback on this class:
    /// flaky connectivity must not log the user out.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::ConnectionFailed { .. } | Self::ConnectionTimeout { .. }
        )
    }

    /// Returns true when the server rejected our credentials.
    ///
    /// This class purges the stored session.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::SessionExpired)
    }

    /// Returns a suggested retry delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }

    /// Create a transport error from any error type.
    pub fn transport<E: std::error::Error>(err: E) -> Self {
        Self::Transport(err.to_string())
    }

    /// Create a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}

impl fmt::Display for SavedFeastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Network error: {}", msg),
            Self::ConnectionFailed { target, reason } => {
                write!(f, "Network error: connection to {} failed: {}", target, reason)
            }
            Self::ConnectionTimeout {
                operation,
                timeout_ms,
            } => {
                write!(f, "Network error: {} timed out after {}ms", operation, timeout_ms)
            }
            Self::Auth(msg) => write!(f, "Authentication failed: {}", msg),
            Self::SessionExpired => write!(f, "Session expired, please log in again"),
            Self::Forbidden(msg) => write!(f, "Not allowed: {}", msg),
            Self::NotFound { resource } => write!(f, "Not found: {}", resource),
            Self::Validation(msg) => write!(f, "{}", msg),
            Self::Rejected(msg) => write!(f, "{}", msg),
            Self::RateLimited { retry_after_ms } => {
                write!(f, "Rate limited, retry after {}ms", retry_after_ms)
            }
            Self::Server { status, message } => {
                if message.is_empty() {
                    write!(f, "Server error ({}), please try again later", status)
                } else {
                    write!(f, "Server error ({}): {}", status, message)
                }
            }
            Self::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Self::Storage(msg) => write!(f, "Storage error: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for SavedFeastError {}

impl From<serde_json::Error> for SavedFeastError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
