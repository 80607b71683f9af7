//! Orders API: creation, history, cancellation, and pickup claim codes.
//!
//! Order status is server-authoritative. This module never computes a
//! transition locally; it requests one (cancel, complete, claim) and takes
//! the order the server returns as ground truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::retry::RetryPolicy;
use crate::{MealId, OrderId, Paginated, Result};

/// Closed set of order states.
///
/// Happy path: `Pending → Accepted → ReadyForPickup → Completed`. Side
/// exits to the two cancellation states and to `Expired` are decided by
/// the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Accepted,
    ReadyForPickup,
    Completed,
    CancelledByCustomer,
    CancelledByRestaurant,
    Expired,
}

impl OrderStatus {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed
                | Self::CancelledByCustomer
                | Self::CancelledByRestaurant
                | Self::Expired
        )
    }

    /// Check if the order is still moving toward pickup.
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Check if the customer may still request cancellation.
    pub fn can_cancel(&self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }

    /// Check if the order ended in either cancellation state.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::CancelledByCustomer | Self::CancelledByRestaurant)
    }
}

/// A placed order as returned by the server.
#[derive(Clone, Debug, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: i64,
    /// Server-computed total. Never recomputed client-side.
    pub total_amount: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub pickup_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pickup_window_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pickup_window_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub pickup_code: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ready_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expired_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Event history, present on the detail endpoint.
    #[serde(default)]
    pub events: Option<Vec<OrderEvent>>,
}

/// A line in a placed order. The price is captured at order-creation time
/// and is independent of later changes to the meal.
#[derive(Clone, Debug, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub meal_id: MealId,
    #[serde(default)]
    pub meal: Option<MealSnapshot>,
    pub quantity: u32,
    pub price: f64,
}

/// Denormalized meal snapshot embedded in an order item.
#[derive(Clone, Debug, Deserialize)]
pub struct MealSnapshot {
    pub id: MealId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub restaurant_name: Option<String>,
}

/// An entry in an order's status history.
#[derive(Clone, Debug, Deserialize)]
pub struct OrderEvent {
    pub status: OrderStatus,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Ephemeral pickup verification code for a ready order.
#[derive(Clone, Debug, Deserialize)]
pub struct ClaimCode {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// One line of a new order: id and quantity only. Prices are
/// authoritative server-side.
#[derive(Clone, Debug, Serialize)]
pub struct OrderItemInput {
    pub meal_id: MealId,
    pub quantity: u32,
}

/// Payload for placing an order.
#[derive(Clone, Debug, Serialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

/// Orders API surface.
pub struct OrdersApi<'a> {
    client: &'a ApiClient,
    retry: RetryPolicy,
}

impl<'a> OrdersApi<'a> {
    /// Create the API surface over a shared client.
    pub fn new(client: &'a ApiClient) -> Self {
        let retry = RetryPolicy::from_config(&client.config().retry);
        Self { client, retry }
    }

    /// Place an order from a cart snapshot.
    ///
    /// Not retried: a duplicated POST could double-submit the order.
    /// Validation failures surface as one joined message; business-rule
    /// rejections (e.g., insufficient stock) surface the server message
    /// verbatim.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order> {
        self.client.post("orders", request).await
    }

    /// Fetch one page of the caller's order history.
    pub async fn get_orders(&self, page: u32) -> Result<Paginated<Order>> {
        let query = [("page", page)];
        self.retry
            .run(|| self.client.get_with_query("me/orders", &query))
            .await
    }

    /// Fetch a single order with items and event history.
    pub async fn get_order(&self, id: OrderId) -> Result<Order> {
        let path = format!("orders/{}/details", id);
        self.retry.run(|| self.client.get(&path)).await
    }

    /// Request cancellation via the staff-authorized path.
    pub async fn cancel_order(&self, id: OrderId) -> Result<Order> {
        self.client.post_empty(&format!("orders/{}/cancel", id)).await
    }

    /// Request cancellation via the customer-authorized path.
    pub async fn cancel_my_order(&self, id: OrderId) -> Result<Order> {
        self.client
            .post_empty(&format!("orders/{}/cancel-my-order", id))
            .await
    }

    /// Mark an order complete (privileged path).
    pub async fn complete_order(&self, id: OrderId) -> Result<Order> {
        self.client
            .post_empty(&format!("orders/{}/complete", id))
            .await
    }

    /// Generate a fresh claim code for a ready order.
    pub async fn generate_claim_code(&self, id: OrderId) -> Result<ClaimCode> {
        self.client.post_empty(&format!("orders/{}/claim", id)).await
    }

    /// Ask the server to resend the pickup code out-of-band.
    pub async fn resend_pickup_code(&self, id: OrderId) -> Result<()> {
        self.client
            .post_discard(&format!("orders/{}/resend-code", id))
            .await
    }

    /// Fetch the currently valid pickup code.
    pub async fn get_pickup_code(&self, id: OrderId) -> Result<ClaimCode> {
        let path = format!("orders/{}/show-code", id);
        self.retry.run(|| self.client.get(&path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let status: OrderStatus = serde_json::from_str(r#""READY_FOR_PICKUP""#).unwrap();
        assert_eq!(status, OrderStatus::ReadyForPickup);
        assert_eq!(
            serde_json::to_string(&OrderStatus::CancelledByCustomer).unwrap(),
            r#""CANCELLED_BY_CUSTOMER""#
        );
    }

    #[test]
    fn test_status_helpers() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Accepted.can_cancel());
        assert!(!OrderStatus::ReadyForPickup.can_cancel());

        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Expired.is_terminal());
        assert!(OrderStatus::ReadyForPickup.is_active());

        assert!(OrderStatus::CancelledByRestaurant.is_cancelled());
        assert!(!OrderStatus::Expired.is_cancelled());
    }

    #[test]
    fn test_create_order_payload_shape() {
        let request = CreateOrderRequest {
            items: vec![OrderItemInput {
                meal_id: MealId(12),
                quantity: 2,
            }],
            notes: None,
            payment_method: Some("card".into()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "items": [{"meal_id": 12, "quantity": 2}],
                "payment_method": "card"
            })
        );
    }

    #[test]
    fn test_order_deserializes_sparse_payload() {
        let raw = r#"{
            "id": 41,
            "user_id": 7,
            "total_amount": 21.0,
            "status": "PENDING",
            "items": [
                {"id": 1, "meal_id": 12, "quantity": 2, "price": 10.5}
            ]
        }"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.id, OrderId(41));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert!(order.items[0].meal.is_none());
        assert!(order.events.is_none());
        assert!(order.pickup_window_end.is_none());
    }

    #[test]
    fn test_claim_code_deserializes() {
        let raw = r#"{"code": "FEAST-8841", "expires_at": "2025-06-01T12:30:00Z"}"#;
        let claim: ClaimCode = serde_json::from_str(raw).unwrap();
        assert_eq!(claim.code, "FEAST-8841");
        assert_eq!(claim.expires_at.timestamp(), 1748781000);
    }
}
