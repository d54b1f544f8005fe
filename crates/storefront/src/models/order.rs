//! Order and line-item rows (`orders` and `order_items` tables).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use amber_lane_core::{OrderId, OrderItemId, OrderNumber, OrderStatus, PaymentMethod, ProductId, ProfileId};

/// A stored order row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_number: OrderNumber,
    pub user_id: ProfileId,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    /// Flattened as `"{address}, {city}, {state}, {zip}"` at insert time.
    pub shipping_address: String,
    pub placed_at: DateTime<Utc>,
}

/// Fields for inserting a new order; the store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub order_number: OrderNumber,
    pub user_id: ProfileId,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub shipping_address: String,
    pub placed_at: DateTime<Utc>,
}

/// A stored order line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
}

/// Fields for inserting a new line item; the store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
}

/// An order with its line items embedded, as returned by order lookup
/// (`select=*,order_items(*)`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    #[serde(default)]
    pub order_items: Vec<OrderLineItem>,
}
