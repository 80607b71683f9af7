//! Property-based tests for the cart aggregator.

use proptest::prelude::*;

use savedfeast_app_core::cart::{Cart, CartProduct};
use savedfeast_lib::MealId;

#[derive(Clone, Debug)]
enum CartOp {
    Add(i64),
    Remove(i64),
    SetQuantity(i64, u32),
    Clear,
}

fn price_for(id: i64) -> f64 {
    1.0 + id as f64 * 0.5
}

fn product(id: i64) -> CartProduct {
    CartProduct {
        id: MealId(id),
        name: format!("Meal {}", id),
        price: price_for(id),
        image: None,
        restaurant: None,
    }
}

fn op_strategy() -> impl Strategy<Value = CartOp> {
    prop_oneof![
        (0i64..8).prop_map(CartOp::Add),
        (0i64..8).prop_map(CartOp::Remove),
        ((0i64..8), (0u32..5)).prop_map(|(id, q)| CartOp::SetQuantity(id, q)),
        Just(CartOp::Clear),
    ]
}

proptest! {
    /// Any operation sequence keeps the cart invariants: unique line ids,
    /// quantity at least 1 per line, and totals consistent with the lines.
    #[test]
    fn test_cart_invariants_hold(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut cart = Cart::new();
        for op in ops {
            match op {
                CartOp::Add(id) => cart.add(product(id)),
                CartOp::Remove(id) => cart.remove(MealId(id)),
                CartOp::SetQuantity(id, q) => cart.set_quantity(MealId(id), q),
                CartOp::Clear => cart.clear(),
            }
        }

        let mut seen = std::collections::HashSet::new();
        let mut expected_total = 0.0;
        let mut expected_count = 0u32;
        for item in cart.items() {
            prop_assert!(item.quantity >= 1);
            prop_assert!(seen.insert(item.id), "duplicate line for {:?}", item.id);
            expected_total += item.price * f64::from(item.quantity);
            expected_count += item.quantity;
        }

        prop_assert!((cart.total() - expected_total).abs() < 1e-9);
        prop_assert_eq!(cart.item_count(), expected_count);
        prop_assert_eq!(cart.is_empty(), cart.item_count() == 0);
    }

    /// The checkout snapshot mirrors the cart lines one-to-one.
    #[test]
    fn test_order_snapshot_mirrors_lines(ids in prop::collection::vec(0i64..8, 1..32)) {
        let mut cart = Cart::new();
        for id in ids {
            cart.add(product(id));
        }

        let snapshot = cart.to_order_items();
        prop_assert_eq!(snapshot.len(), cart.len());
        for (line, input) in cart.items().iter().zip(&snapshot) {
            prop_assert_eq!(line.id, input.meal_id);
            prop_assert_eq!(line.quantity, input.quantity);
        }
    }
}
