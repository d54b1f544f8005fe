//! Checkout request/response wire types.
//!
//! The public API speaks camelCase JSON; fields arrive as plain strings and
//! are validated by the checkout service before any store call, so that a
//! malformed submission produces field-level errors rather than a serde
//! rejection of the whole body.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use amber_lane_core::{OrderId, OrderNumber};

/// A checkout submission (`POST /api/orders` body).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub shipping_city: String,
    #[serde(default)]
    pub shipping_state: String,
    #[serde(default)]
    pub shipping_zip: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
}

/// One cart line in a checkout submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub quantity: u32,
    /// Unit price at the time the cart was built.
    #[serde(default, alias = "price")]
    pub unit_price: Decimal,
}

/// Returned to the caller on a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_number: OrderNumber,
    pub order_id: OrderId,
}
