//! Integration tests for the order placement workflow: profile reuse,
//! item-batch atomicity, rollback scoping, and order-number format.

#![allow(clippy::unwrap_used)]

mod support;

use std::sync::Arc;

use rust_decimal::Decimal;

use amber_lane_core::{OrderNumber, OrderStatus, PaymentMethod};
use amber_lane_storefront::models::{CheckoutItem, CheckoutRequest};
use amber_lane_storefront::services::{CheckoutError, CheckoutService};

use support::InMemoryStore;

fn service(store: &InMemoryStore) -> CheckoutService {
    CheckoutService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
    )
}

fn request(email: &str, items: Vec<CheckoutItem>, total: i64) -> CheckoutRequest {
    CheckoutRequest {
        customer_name: "Ayesha Khan".to_string(),
        customer_email: email.to_string(),
        customer_phone: "03001234567".to_string(),
        shipping_address: "14 Canal View Road".to_string(),
        shipping_city: "Lahore".to_string(),
        shipping_state: "Punjab".to_string(),
        shipping_zip: "54000".to_string(),
        payment_method: "COD".to_string(),
        total: Decimal::from(total),
        items,
    }
}

fn item(product_id: &str, quantity: u32, unit_price: i64) -> CheckoutItem {
    CheckoutItem {
        product_id: product_id.to_string(),
        quantity,
        unit_price: Decimal::from(unit_price),
    }
}

// Scenario A: new email, one item, store ends with exactly one of each row.
#[tokio::test]
async fn new_customer_checkout_creates_profile_order_and_item() {
    let store = InMemoryStore::new();
    let checkout = service(&store);

    let receipt = checkout
        .place_order(request("a@x.com", vec![item("p1", 2, 10)], 20))
        .await
        .unwrap();

    let number: u32 = receipt.order_number.as_str().parse().unwrap();
    assert!((100_000..=999_999).contains(&number));

    let state = store.state();
    assert_eq!(state.profiles.len(), 1);
    assert_eq!(state.orders.len(), 1);
    assert_eq!(state.items.len(), 1);

    let order = &state.orders[0];
    assert_eq!(order.id, receipt.order_id);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_method, PaymentMethod::CashOnDelivery);
    assert_eq!(order.user_id, state.profiles[0].id);
    assert_eq!(order.shipping_address, "14 Canal View Road, Lahore, Punjab, 54000");

    let line = &state.items[0];
    assert_eq!(line.order_id, order.id);
    assert_eq!(line.product_id.as_str(), "p1");
    assert_eq!(line.quantity, 2);
    assert_eq!(line.price, Decimal::from(10));
}

// P1: the same email reuses the same profile across calls.
#[tokio::test]
async fn repeat_customer_reuses_profile() {
    let store = InMemoryStore::new();
    let checkout = service(&store);

    let first = checkout
        .place_order(request("repeat@x.com", vec![item("p1", 1, 10)], 10))
        .await
        .unwrap();
    let second = checkout
        .place_order(request("repeat@x.com", vec![item("p2", 3, 5)], 15))
        .await
        .unwrap();

    assert_ne!(first.order_id, second.order_id);

    let state = store.state();
    assert_eq!(state.profiles.len(), 1);
    assert_eq!(state.orders.len(), 2);
    assert_eq!(state.orders[0].user_id, state.orders[1].user_id);
}

// Scenario B: a pre-existing profile is reused, never duplicated.
#[tokio::test]
async fn existing_profile_is_reused() {
    let store = InMemoryStore::new();
    let profile_id = store.seed_profile("u1@x.com");
    let checkout = service(&store);

    checkout
        .place_order(request("u1@x.com", vec![item("p2", 1, 5)], 5))
        .await
        .unwrap();

    let state = store.state();
    assert_eq!(state.profiles.len(), 1);
    assert_eq!(state.orders.len(), 1);
    assert_eq!(state.orders[0].user_id, profile_id);
}

// P4: M items on success, sum consistent with the submitted total.
#[tokio::test]
async fn success_leaves_all_items() {
    let store = InMemoryStore::new();
    let checkout = service(&store);

    let receipt = checkout
        .place_order(request(
            "m@x.com",
            vec![item("p1", 2, 10), item("p2", 1, 5), item("p3", 4, 2)],
            33,
        ))
        .await
        .unwrap();

    let state = store.state();
    assert_eq!(state.items.len(), 3);
    assert!(state.items.iter().all(|i| i.order_id == receipt.order_id));

    let sum: Decimal = state
        .items
        .iter()
        .map(|i| Decimal::from(i.quantity) * i.price)
        .sum();
    assert_eq!(sum, state.orders[0].total_amount);
}

// Empty carts are accepted; the item loop is a no-op.
#[tokio::test]
async fn empty_cart_is_accepted() {
    let store = InMemoryStore::new();
    let checkout = service(&store);

    checkout
        .place_order(request("empty@x.com", vec![], 1))
        .await
        .unwrap();

    let state = store.state();
    assert_eq!(state.orders.len(), 1);
    assert!(state.items.is_empty());
}

// Scenario C / P2: a mid-batch item failure removes the order, every
// sibling item, and the freshly created profile.
#[tokio::test]
async fn item_failure_rolls_back_order_items_and_fresh_profile() {
    let store = InMemoryStore::new();
    store.state().fail_item_insert_at = Some(1);
    let checkout = service(&store);

    let err = checkout
        .place_order(request("c@x.com", vec![item("p1", 1, 10), item("p2", 1, 5)], 15))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::ItemCreate { index: 1, .. }));

    let state = store.state();
    assert!(state.orders.is_empty());
    assert!(state.items.is_empty());
    drop(state);
    assert_eq!(store.profiles_for("c@x.com"), 0);
}

// Compensation order: items before the order row, order before the profile.
#[tokio::test]
async fn unwind_runs_in_reverse_write_order() {
    let store = InMemoryStore::new();
    store.state().fail_item_insert_at = Some(0);
    let checkout = service(&store);

    checkout
        .place_order(request("rev@x.com", vec![item("p1", 1, 10)], 10))
        .await
        .unwrap_err();

    let state = store.state();
    assert_eq!(state.delete_log, vec!["order_items", "orders", "user_profiles"]);
}

// An item failure after a pre-existing profile leaves that profile alone.
#[tokio::test]
async fn item_failure_spares_preexisting_profile() {
    let store = InMemoryStore::new();
    store.seed_profile("kept@x.com");
    store.state().fail_item_insert_at = Some(0);
    let checkout = service(&store);

    checkout
        .place_order(request("kept@x.com", vec![item("p1", 1, 10)], 10))
        .await
        .unwrap_err();

    assert_eq!(store.profiles_for("kept@x.com"), 1);
    let state = store.state();
    assert!(state.orders.is_empty());
    // Only order-side compensations ran; no profile delete was issued.
    assert_eq!(state.delete_log, vec!["order_items", "orders"]);
}

// P3: an order-insert failure removes a profile created in the same call...
#[tokio::test]
async fn order_failure_rolls_back_fresh_profile() {
    let store = InMemoryStore::new();
    store.state().fail_order_insert = true;
    let checkout = service(&store);

    let err = checkout
        .place_order(request("fresh@x.com", vec![item("p1", 1, 10)], 10))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::OrderCreate(_)));
    assert_eq!(store.profiles_for("fresh@x.com"), 0);
    assert!(store.state().orders.is_empty());
}

// Scenario D: ...but never a profile that pre-existed the call.
#[tokio::test]
async fn order_failure_spares_preexisting_profile() {
    let store = InMemoryStore::new();
    store.seed_profile("d@x.com");
    store.state().fail_order_insert = true;
    let checkout = service(&store);

    let err = checkout
        .place_order(request("d@x.com", vec![item("p1", 1, 10)], 10))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::OrderCreate(_)));
    assert_eq!(store.profiles_for("d@x.com"), 1);
    let state = store.state();
    assert!(state.orders.is_empty());
    assert!(state.delete_log.is_empty());
}

// A profile-insert failure is fatal with nothing to compensate.
#[tokio::test]
async fn profile_failure_is_fatal_without_compensation() {
    let store = InMemoryStore::new();
    store.state().fail_profile_insert = true;
    let checkout = service(&store);

    let err = checkout
        .place_order(request("p@x.com", vec![item("p1", 1, 10)], 10))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::ProfileCreate(_)));
    let state = store.state();
    assert!(state.delete_log.is_empty());
    assert!(state.orders.is_empty());
}

// A failing compensation never masks the step error that started the
// unwind, and the remaining compensations still run.
#[tokio::test]
async fn compensation_failure_does_not_mask_primary_error() {
    let store = InMemoryStore::new();
    {
        let mut state = store.state();
        state.fail_item_insert_at = Some(0);
        state.fail_deletes = true;
    }
    let checkout = service(&store);

    let err = checkout
        .place_order(request("mask@x.com", vec![item("p1", 1, 10)], 10))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::ItemCreate { index: 0, .. }));
    // All three compensations were attempted despite each failing.
    assert_eq!(
        store.state().delete_log,
        vec!["order_items", "orders", "user_profiles"]
    );
}

// Validation rejects the submission before any store call.
#[tokio::test]
async fn validation_failure_touches_no_store() {
    let store = InMemoryStore::new();
    let checkout = service(&store);

    let mut bad = request("not-an-email", vec![item("p1", 1, 10)], 10);
    bad.payment_method = "VISA".to_string();

    let err = checkout.place_order(bad).await.unwrap_err();

    let CheckoutError::Validation(details) = err else {
        panic!("expected validation error");
    };
    assert!(details.iter().any(|d| d.field == "customerEmail"));
    assert!(details.iter().any(|d| d.field == "paymentMethod"));

    let state = store.state();
    assert!(state.profiles.is_empty());
    assert!(state.orders.is_empty());
}

// P5: order numbers are always six digits with a non-zero first digit.
#[tokio::test]
async fn order_numbers_are_six_digit_strings() {
    let store = InMemoryStore::new();
    let checkout = service(&store);

    for n in 0..100 {
        let receipt = checkout
            .place_order(request(&format!("n{n}@x.com"), vec![], 1))
            .await
            .unwrap();

        let digits = receipt.order_number.as_str();
        assert_eq!(digits.len(), 6);
        assert!(digits.bytes().all(|b| b.is_ascii_digit()));
        assert!(!digits.starts_with('0'));
        // Round-trips through the parser unchanged.
        assert_eq!(
            OrderNumber::parse(digits).unwrap().as_str(),
            receipt.order_number.as_str()
        );
    }
}
