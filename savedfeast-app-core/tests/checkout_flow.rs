//! End-to-end checkout flow against a mock API server.

use std::sync::Arc;

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use savedfeast_app_core::cart::CartProduct;
use savedfeast_app_core::AppCore;
use savedfeast_lib::prelude::*;

fn veggie_box() -> CartProduct {
    CartProduct {
        id: MealId(12),
        name: "Veggie Box".into(),
        price: 10.50,
        image: None,
        restaurant: Some("Green Corner".into()),
    }
}

fn core_against(server: &MockServer) -> AppCore {
    AppCore::new(
        ApiConfig::new(format!("{}/api", server.uri())),
        Arc::new(MemoryCredentialStore::new()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_checkout_trusts_server_total_and_clears_cart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(body_partial_json(serde_json::json!({
            "items": [{"meal_id": 12, "quantity": 2}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 41,
            "user_id": 7,
            "total_amount": 21.0,
            "status": "PENDING",
            "items": [
                {"id": 1, "meal_id": 12, "quantity": 2, "price": 10.5}
            ]
        })))
        .mount(&server)
        .await;

    let mut core = core_against(&server);
    core.cart_mut().add(veggie_box());
    core.cart_mut().add(veggie_box());
    assert!((core.cart().total() - 21.0).abs() < 1e-2);

    let order = core.checkout(None, None).await.unwrap();

    // The server-computed total is ground truth; the client does not
    // recompute or override it.
    assert!((order.total_amount - 21.0).abs() < 1e-2);
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(core.cart().is_empty());
}

#[tokio::test]
async fn test_failed_checkout_keeps_cart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "message": "Insufficient stock for Veggie Box"
        })))
        .mount(&server)
        .await;

    let mut core = core_against(&server);
    core.cart_mut().add(veggie_box());

    let err = core.checkout(None, None).await.unwrap_err();
    assert_eq!(err.to_string(), "Insufficient stock for Veggie Box");

    // The user keeps their selection to adjust and retry.
    assert_eq!(core.cart().item_count(), 1);
}
