//! Configuration types for the SavedFeast API client.

use serde::{Deserialize, Serialize};

/// Configuration for the SavedFeast REST API client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API base URL including the `/api` path prefix
    /// (e.g., `https://api.savedfeast.app/api`).
    pub base_url: String,

    /// Request timeout in seconds for ordinary API calls.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Hard deadline in seconds for the logout call. Local state is
    /// cleared whether or not the server answers in time.
    #[serde(default = "default_logout_timeout")]
    pub logout_timeout_secs: u64,

    /// Deadline in seconds for the current-user refresh before falling
    /// back to cached data.
    #[serde(default = "default_user_fetch_timeout")]
    pub user_fetch_timeout_secs: u64,

    /// Retry tuning shared by the auth and read flows.
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_timeout() -> u64 {
    30
}

fn default_logout_timeout() -> u64 {
    5
}

fn default_user_fetch_timeout() -> u64 {
    10
}

impl ApiConfig {
    /// Create a new configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout(),
            logout_timeout_secs: default_logout_timeout(),
            user_fetch_timeout_secs: default_user_fetch_timeout(),
            retry: RetryConfig::default(),
        }
    }

    /// Create config for the production API.
    pub fn production() -> Self {
        Self::new("https://api.savedfeast.app/api")
    }

    /// Create config for a local development server.
    pub fn local_dev() -> Self {
        Self::new("http://127.0.0.1:8000/api")
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the logout deadline.
    pub fn with_logout_timeout(mut self, secs: u64) -> Self {
        self.logout_timeout_secs = secs;
        self
    }

    /// Set the current-user refresh deadline.
    pub fn with_user_fetch_timeout(mut self, secs: u64) -> Self {
        self.user_fetch_timeout_secs = secs;
        self
    }

    /// Set the retry tuning.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// Retry tuning for transient failures.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base backoff delay in milliseconds; doubled per attempt.
    #[serde(default = "default_base_delay")]
    pub base_delay_ms: u64,

    /// Cap on the backoff delay in milliseconds.
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay() -> u64 {
    500
}

fn default_max_delay() -> u64 {
    8000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay(),
            max_delay_ms: default_max_delay(),
        }
    }
}

impl RetryConfig {
    /// Set the maximum attempt count.
    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    /// Set the base backoff delay.
    pub fn with_base_delay(mut self, ms: u64) -> Self {
        self.base_delay_ms = ms;
        self
    }

    /// Set the backoff cap.
    pub fn with_max_delay(mut self, ms: u64) -> Self {
        self.max_delay_ms = ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = ApiConfig::new("https://example.com/api")
            .with_timeout(60)
            .with_user_fetch_timeout(15);

        assert_eq!(config.base_url, "https://example.com/api");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_fetch_timeout_secs, 15);
        assert_eq!(config.logout_timeout_secs, 5);
    }

    #[test]
    fn test_presets() {
        let prod = ApiConfig::production();
        assert!(prod.base_url.contains("savedfeast.app"));

        let local = ApiConfig::local_dev();
        assert!(local.base_url.starts_with("http://127.0.0.1"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: ApiConfig =
            serde_json::from_str(r#"{"base_url": "https://example.com/api"}"#).unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.logout_timeout_secs, 5);
        assert_eq!(config.user_fetch_timeout_secs, 10);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.max_delay_ms, 8000);
    }
}
