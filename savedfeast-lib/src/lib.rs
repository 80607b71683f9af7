//! SavedFeast client library.
//!
//! The remote-API core of the SavedFeast surplus-meal client: discounted
//! meal discovery, orders with pickup claim codes, and the authenticated
//! session lifecycle. Screens and navigation live in the host
//! applications; this crate owns everything between them and the REST API.
//!
//! # Features
//!
//! - **Session lifecycle**: login/register/logout with persisted bearer
//!   token and cached user, tolerant of flaky connectivity
//!   ([`auth::AuthSession`])
//! - **Orders**: creation from a cart snapshot, history, cancellation,
//!   pickup claim codes ([`orders::OrdersApi`])
//! - **Meal catalog**: browsing, filters, favorites ([`meals::MealsApi`])
//! - **Storage abstraction**: trait-based credential storage so each
//!   platform brings its own keystore ([`secure_storage`])
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use savedfeast_lib::prelude::*;
//!
//! let vault = Arc::new(SessionVault::new(Arc::new(MemoryCredentialStore::new())));
//! let client = Arc::new(ApiClient::new(ApiConfig::production(), vault)?);
//!
//! let auth = AuthSession::new(client.clone());
//! auth.login(&LoginCredentials {
//!     email: "maya@example.com".into(),
//!     password: "secret".into(),
//! })
//! .await?;
//!
//! let orders = OrdersApi::new(&client);
//! let recent = orders.get_orders(1).await?;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod meals;
pub mod orders;
pub mod prelude;
pub mod retry;
pub mod secure_storage;

pub use client::ApiClient;
pub use config::{ApiConfig, RetryConfig};
pub use errors::{SavedFeastError, SavedFeastErrorCode};
pub use retry::RetryPolicy;
pub use secure_storage::SessionVault;

/// Common result alias for SavedFeast operations.
pub type Result<T> = std::result::Result<T, SavedFeastError>;

/// Identifier of a meal offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealId(pub i64);

impl MealId {
    /// Get the raw numeric id.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for MealId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl OrderId {
    /// Get the raw numeric id.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page of a paginated listing.
#[derive(Clone, Debug, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub last_page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
}

impl<T> Paginated<T> {
    /// Check whether another page follows this one.
    pub fn has_more(&self) -> bool {
        self.current_page < self.last_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_transparent_in_json() {
        let id: MealId = serde_json::from_str("12").unwrap();
        assert_eq!(id, MealId(12));
        assert_eq!(serde_json::to_string(&OrderId(41)).unwrap(), "41");
        assert_eq!(OrderId(41).to_string(), "41");
    }

    #[test]
    fn test_pagination_has_more() {
        let raw = r#"{"data": [1, 2, 3], "current_page": 1, "last_page": 2, "per_page": 3, "total": 5}"#;
        let page: Paginated<u32> = serde_json::from_str(raw).unwrap();
        assert!(page.has_more());

        let raw = r#"{"data": []}"#;
        let page: Paginated<u32> = serde_json::from_str(raw).unwrap();
        assert!(!page.has_more());
    }
}
