//! Application core wiring.
//!
//! [`AppCore`] assembles the injected credential store and configuration
//! into the concrete services, so hosting code takes its dependencies as
//! explicit parameters instead of ambient globals. It also owns the cart
//! and the checkout rule: the cart resets only after the server confirms
//! the order.

use std::sync::Arc;

use savedfeast_lib::auth::AuthSession;
use savedfeast_lib::meals::MealsApi;
use savedfeast_lib::orders::{CreateOrderRequest, Order, OrdersApi};
use savedfeast_lib::secure_storage::{CredentialStore, SessionVault};
use savedfeast_lib::{ApiClient, ApiConfig, SavedFeastError};

use crate::cart::Cart;

/// Errors surfaced by the application core.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("cart is empty")]
    EmptyCart,
    #[error(transparent)]
    Api(#[from] SavedFeastError),
}

/// Result type for application-core operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// The assembled client-side application core.
pub struct AppCore {
    client: Arc<ApiClient>,
    auth: AuthSession,
    cart: Cart,
}

impl AppCore {
    /// Build the core from a configuration and a platform credential
    /// store.
    pub fn new(config: ApiConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let vault = Arc::new(SessionVault::new(store));
        let client = Arc::new(ApiClient::new(config, vault)?);
        let auth = AuthSession::new(client.clone());
        Ok(Self {
            client,
            auth,
            cart: Cart::new(),
        })
    }

    /// The shared API client.
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// The session manager.
    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    /// The cart, read-only.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The cart, for add/remove/quantity updates.
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Orders API surface over the shared client.
    pub fn orders(&self) -> OrdersApi<'_> {
        OrdersApi::new(&self.client)
    }

    /// Meals API surface over the shared client.
    pub fn meals(&self) -> MealsApi<'_> {
        MealsApi::new(&self.client)
    }

    /// Place an order from the cart contents.
    ///
    /// The cart snapshot carries ids and quantities only; the server
    /// computes the total. The cart clears after, and only after, the
    /// server confirms.
    pub async fn checkout(
        &mut self,
        notes: Option<String>,
        payment_method: Option<String>,
    ) -> Result<Order> {
        if self.cart.is_empty() {
            return Err(AppError::EmptyCart);
        }
        let request = CreateOrderRequest {
            items: self.cart.to_order_items(),
            notes,
            payment_method,
        };
        let order = OrdersApi::new(&self.client).create_order(&request).await?;
        tracing::debug!("order {} placed, clearing cart", order.id);
        self.cart.clear();
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use savedfeast_lib::secure_storage::MemoryCredentialStore;

    #[tokio::test]
    async fn test_checkout_refuses_empty_cart() {
        let mut core = AppCore::new(
            ApiConfig::local_dev(),
            Arc::new(MemoryCredentialStore::new()),
        )
        .unwrap();

        let err = core.checkout(None, None).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyCart));
        assert_eq!(err.to_string(), "cart is empty");
    }

    #[test]
    fn test_api_errors_pass_through_display() {
        let err = AppError::from(SavedFeastError::Validation("Items are required".into()));
        assert_eq!(err.to_string(), "Items are required");
    }
}
