//! Authentication session manager.
//!
//! Owns the login/register/logout lifecycle and the persisted session
//! state (bearer token + cached user). The one subtle invariant lives in
//! [`AuthSession::current_user`]: network-class failures fall back to the
//! cached user without touching storage, while a 401 purges the session.
//! Transient connectivity loss must never log the user out; server-side
//! revocation always must.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::retry::RetryPolicy;
use crate::secure_storage::SessionVault;
use crate::{Result, SavedFeastError};

/// Identity record for the signed-in customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

impl User {
    /// Display name for greeting headers.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Login request payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Registration request payload.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Partial profile update. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Password change request payload.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Successful login/register response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    #[allow(dead_code)]
    message: Option<String>,
}

/// Manager for the authenticated session.
pub struct AuthSession {
    client: Arc<ApiClient>,
    retry: RetryPolicy,
}

impl AuthSession {
    /// Create a session manager over the shared API client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        let retry = RetryPolicy::from_config(&client.config().retry);
        Self { client, retry }
    }

    fn vault(&self) -> &Arc<SessionVault> {
        self.client.vault()
    }

    /// Log in and persist the resulting session.
    ///
    /// Invalid credentials (401/403) propagate without a retry; transient
    /// failures back off and retry.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        let response: AuthResponse = self
            .retry
            .run(|| self.client.post("login", credentials))
            .await?;
        self.vault()
            .store_session(&response.token, &response.user)
            .await;
        Ok(response)
    }

    /// Register a new account and persist the resulting session.
    pub async fn register(&self, data: &RegisterData) -> Result<AuthResponse> {
        let response: AuthResponse = self.retry.run(|| self.client.post("register", data)).await?;
        self.vault()
            .store_session(&response.token, &response.user)
            .await;
        Ok(response)
    }

    /// Log out.
    ///
    /// The server call is best-effort with a hard deadline; local state is
    /// cleared unconditionally, so logout cannot be defeated by a dead
    /// network.
    pub async fn logout(&self) {
        let deadline = Duration::from_secs(self.client.config().logout_timeout_secs);
        match tokio::time::timeout(deadline, self.client.post_discard("logout")).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!("logout API call failed: {}", e),
            Err(_) => tracing::debug!("logout API call timed out"),
        }
        self.vault().clear().await;
    }

    /// Get the current user.
    ///
    /// Returns `None` immediately when no token is stored. Otherwise tries
    /// a fresh fetch under the configured deadline:
    ///
    /// - success overwrites the cache and returns the fresh user;
    /// - a 401 purges the stored session and returns `None`;
    /// - network/timeout failures return the cached user unchanged, so
    ///   flaky connectivity does not end the session;
    /// - anything else also falls back to the cache when present.
    pub async fn current_user(&self) -> Result<Option<User>> {
        if !self.vault().has_token().await {
            return Ok(None);
        }

        let deadline = Duration::from_secs(self.client.config().user_fetch_timeout_secs);
        let err = match tokio::time::timeout(deadline, self.client.get::<User>("user")).await {
            Ok(Ok(user)) => {
                self.vault().store_user(&user).await;
                return Ok(Some(user));
            }
            Ok(Err(e)) => e,
            Err(_) => SavedFeastError::ConnectionTimeout {
                operation: "request to user".to_string(),
                timeout_ms: deadline.as_millis() as u64,
            },
        };

        if err.is_auth() {
            tracing::warn!("stored session rejected by server, purging: {}", err);
            self.vault().clear().await;
            return Ok(None);
        }

        if err.is_network() {
            tracing::debug!("current user fetch failed ({}), serving cached user", err);
        } else {
            tracing::debug!("current user fetch failed ({}), trying cached user", err);
        }
        Ok(self.vault().cached_user().await)
    }

    /// True iff a token is present. Storage errors read as false.
    pub async fn is_authenticated(&self) -> bool {
        self.vault().has_token().await
    }

    /// Update profile fields and persist the returned user.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let user: User = self
            .retry
            .run(|| self.client.post("user/profile", update))
            .await?;
        self.vault().store_user(&user).await;
        Ok(user)
    }

    /// Change the account password.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        let _: MessageResponse = self
            .retry
            .run(|| self.client.post("user/change-password", change))
            .await?;
        Ok(())
    }
}
