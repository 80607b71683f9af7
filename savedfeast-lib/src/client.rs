//! HTTP client for the SavedFeast REST API.
//!
//! A single configured [`reqwest::Client`] behind a thin wrapper that owns
//! the base URL, attaches the bearer token read from the session vault
//! before each request, and normalizes every failure into the
//! [`SavedFeastError`] taxonomy. Service modules ([`crate::auth`],
//! [`crate::orders`], [`crate::meals`]) build on the `get`/`post` helpers
//! here and never see a raw `reqwest` error.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::secure_storage::SessionVault;
use crate::{Result, SavedFeastError};

/// Configured HTTP client for the SavedFeast API.
pub struct ApiClient {
    config: ApiConfig,
    vault: Arc<SessionVault>,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new client from a configuration and session vault.
    pub fn new(config: ApiConfig, vault: Arc<SessionVault>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SavedFeastError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            vault,
            http,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Get the session vault this client reads its bearer token from.
    pub fn vault(&self) -> &Arc<SessionVault> {
        &self.vault
    }

    /// Build the full URL for an API path.
    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Attach the default headers and, when present, the stored bearer
    /// token.
    async fn prepare(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.header(reqwest::header::ACCEPT, "application/json");
        match self.vault.token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let request = self.prepare(self.http.get(&url)).await;
        let response = request
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(path, e))?;
        self.handle_response(path, response).await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        let request = self.prepare(self.http.get(&url).query(query)).await;
        let response = request
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(path, e))?;
        self.handle_response(path, response).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let request = self.prepare(self.http.post(&url).json(body)).await;
        let response = request
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(path, e))?;
        self.handle_response(path, response).await
    }

    /// Make a POST request without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let request = self.prepare(self.http.post(&url)).await;
        let response = request
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(path, e))?;
        self.handle_response(path, response).await
    }

    /// Make a POST request without a body, discarding the response
    /// payload. Status errors are still mapped.
    pub async fn post_discard(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        let request = self.prepare(self.http.post(&url)).await;
        let response = request
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(path, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status.as_u16(), path, &body));
        }
        Ok(())
    }

    /// Handle an HTTP response, parsing JSON or mapping the error.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status.as_u16(), path, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SavedFeastError::Serialization(format!("Failed to parse API response: {}", e)))
    }

    /// Map reqwest errors to the client taxonomy.
    fn map_reqwest_error(&self, path: &str, e: reqwest::Error) -> SavedFeastError {
        if e.is_timeout() {
            SavedFeastError::ConnectionTimeout {
                operation: format!("request to {}", path),
                timeout_ms: self.config.timeout_secs * 1000,
            }
        } else if e.is_connect() {
            SavedFeastError::ConnectionFailed {
                target: self.config.base_url.clone(),
                reason: e.to_string(),
            }
        } else {
            SavedFeastError::Transport(format!("request to {} failed: {}", path, e))
        }
    }
}

/// Error payload shape returned by the API.
///
/// `errors` carries field-level validation messages on HTTP 422.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Map an HTTP error status plus its body to [`SavedFeastError`].
fn map_status_error(status: u16, path: &str, raw_body: &str) -> SavedFeastError {
    let body: ErrorBody = serde_json::from_str(raw_body).unwrap_or_default();

    match status {
        400 => SavedFeastError::Rejected(
            body.message
                .unwrap_or_else(|| "The request could not be processed".to_string()),
        ),
        401 => SavedFeastError::Auth(
            body.message.unwrap_or_else(|| "Unauthenticated".to_string()),
        ),
        403 => SavedFeastError::Forbidden(
            body.message
                .unwrap_or_else(|| "This action is not allowed".to_string()),
        ),
        404 => SavedFeastError::NotFound {
            resource: body.message.unwrap_or_else(|| path.to_string()),
        },
        422 => {
            // Flatten all field messages into one user-facing string.
            let joined = body
                .errors
                .map(|fields| {
                    fields
                        .into_values()
                        .flatten()
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .filter(|msg| !msg.is_empty());
            SavedFeastError::Validation(
                joined
                    .or(body.message)
                    .unwrap_or_else(|| "Validation failed".to_string()),
            )
        }
        429 => SavedFeastError::RateLimited {
            retry_after_ms: 5000,
        },
        500..=599 => SavedFeastError::Server {
            status,
            message: body.message.unwrap_or_default(),
        },
        _ => SavedFeastError::Transport(format!(
            "request to {} failed ({}): {}",
            path, status, raw_body
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secure_storage::MemoryCredentialStore;

    fn test_client(base_url: &str) -> ApiClient {
        let vault = Arc::new(SessionVault::new(Arc::new(MemoryCredentialStore::new())));
        ApiClient::new(ApiConfig::new(base_url), vault).unwrap()
    }

    #[test]
    fn test_url_building() {
        let client = test_client("https://api.example.com/api/");
        assert_eq!(
            client.url("/orders/7/details"),
            "https://api.example.com/api/orders/7/details"
        );
        assert_eq!(client.url("login"), "https://api.example.com/api/login");
    }

    #[test]
    fn test_validation_messages_joined() {
        let raw = r#"{
            "message": "The given data was invalid.",
            "errors": {
                "items": ["Items are required"],
                "pickup_time": ["Pickup time is required"]
            }
        }"#;
        let err = map_status_error(422, "orders", raw);
        assert_eq!(
            err.to_string(),
            "Items are required, Pickup time is required"
        );
    }

    #[test]
    fn test_validation_falls_back_to_message() {
        let raw = r#"{"message": "The given data was invalid."}"#;
        let err = map_status_error(422, "orders", raw);
        assert_eq!(err.to_string(), "The given data was invalid.");
    }

    #[test]
    fn test_business_rule_message_verbatim() {
        let raw = r#"{"message": "Insufficient stock for Veggie Box"}"#;
        let err = map_status_error(400, "orders", raw);
        assert_eq!(err.to_string(), "Insufficient stock for Veggie Box");
    }

    #[test]
    fn test_auth_and_server_mapping() {
        let err = map_status_error(401, "user", r#"{"message":"Unauthenticated."}"#);
        assert!(err.is_auth());

        let err = map_status_error(503, "meals", "");
        assert!(err.is_retryable());
        assert!(err.to_string().contains("try again later"));
    }

    #[test]
    fn test_unparseable_body_still_maps() {
        let err = map_status_error(404, "orders/9/details", "<html>gone</html>");
        assert!(err.is_non_retryable());
        assert!(err.to_string().contains("orders/9/details"));
    }
}
