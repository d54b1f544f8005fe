//! Admin back-office route handlers.
//!
//! These listings are unauthenticated in this service; deployments gate
//! `/api/admin` at the network layer.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::models::{OrderWithItems, Profile};
use crate::state::AppState;

/// List every order, newest first.
///
/// `GET /api/admin/orders`
///
/// # Errors
///
/// Returns `502` if the hosted store is unreachable.
pub async fn orders(State(state): State<AppState>) -> Result<Json<Vec<OrderWithItems>>> {
    let orders = state.supabase().list_orders().await?;
    Ok(Json(orders))
}

/// List every customer profile.
///
/// `GET /api/admin/users`
///
/// # Errors
///
/// Returns `502` if the hosted store is unreachable.
pub async fn users(State(state): State<AppState>) -> Result<Json<Vec<Profile>>> {
    let profiles = state.supabase().list_profiles().await?;
    Ok(Json(profiles))
}
