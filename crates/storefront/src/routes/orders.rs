//! Order route handlers: checkout and order lookup.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use amber_lane_core::OrderNumber;

use crate::error::{AppError, Result};
use crate::models::{CheckoutRequest, OrderReceipt, OrderWithItems};
use crate::state::AppState;

/// Place an order.
///
/// `POST /api/orders`
///
/// Runs the placement workflow; on success returns `201` with the order
/// number and id. Validation failures return `400` with field-level
/// details; store failures return `502` with "order was not placed".
///
/// # Errors
///
/// Returns `AppError::Checkout` on any workflow failure.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderReceipt>)> {
    let receipt = state.checkout().place_order(request).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// Look up an order and its line items by order number.
///
/// `GET /api/orders/{order_number}`
///
/// # Errors
///
/// Returns `400` for a malformed order number and `404` if no order
/// carries it.
pub async fn show(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<Json<OrderWithItems>> {
    let order_number: OrderNumber = order_number
        .parse()
        .map_err(|e: amber_lane_core::OrderNumberError| AppError::BadRequest(e.to_string()))?;

    let order = state.supabase().get_order_by_number(&order_number).await?;
    Ok(Json(order))
}
