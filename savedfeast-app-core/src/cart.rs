//! In-memory cart aggregator.
//!
//! Purely client-side state: one line per meal id, insertion order
//! preserved (it is user-visible), quantity at least 1 while a line
//! exists. No persistence across process restarts; the surrounding app
//! clears the cart after a confirmed checkout.

use serde::{Deserialize, Serialize};

use savedfeast_lib::meals::Meal;
use savedfeast_lib::orders::OrderItemInput;
use savedfeast_lib::MealId;

/// A product as it enters the cart (no quantity yet).
#[derive(Clone, Debug, PartialEq)]
pub struct CartProduct {
    pub id: MealId,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub restaurant: Option<String>,
}

impl From<&Meal> for CartProduct {
    fn from(meal: &Meal) -> Self {
        Self {
            id: meal.id,
            name: meal.title.clone(),
            price: meal.price,
            image: meal.image.clone(),
            restaurant: meal.restaurant_name.clone(),
        }
    }
}

/// One line in the cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: MealId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<String>,
}

/// Insertion-ordered cart.
#[derive(Clone, Debug, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product: increments the existing line or appends a new one
    /// with quantity 1.
    pub fn add(&mut self, product: CartProduct) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == product.id) {
            item.quantity += 1;
            return;
        }
        self.items.push(CartItem {
            id: product.id,
            name: product.name,
            price: product.price,
            quantity: 1,
            image: product.image,
            restaurant: product.restaurant,
        });
    }

    /// Remove a line. No-op when the id is absent.
    pub fn remove(&mut self, id: MealId) {
        self.items.retain(|i| i.id != id);
    }

    /// Set a line's quantity. Zero removes the line; an absent id is a
    /// no-op. The quantity is not clamped upward.
    pub fn set_quantity(&mut self, id: MealId, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price times quantity over all lines.
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.price * f64::from(i.quantity))
            .sum()
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Snapshot for order creation: ids and quantities only. Prices are
    /// authoritative server-side.
    pub fn to_order_items(&self) -> Vec<OrderItemInput> {
        self.items
            .iter()
            .map(|i| OrderItemInput {
                meal_id: i.id,
                quantity: i.quantity,
            })
            .collect()
    }
}
