//! Brand and category route handlers.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::models::{Brand, Category};
use crate::state::AppState;

/// Fetch every brand.
///
/// `GET /api/brands`
///
/// # Errors
///
/// Returns `502` if the hosted store is unreachable.
pub async fn brands(State(state): State<AppState>) -> Result<Json<Vec<Brand>>> {
    let brands = state.supabase().list_brands().await?;
    Ok(Json(brands))
}

/// Fetch every category.
///
/// `GET /api/categories`
///
/// # Errors
///
/// Returns `502` if the hosted store is unreachable.
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.supabase().list_categories().await?;
    Ok(Json(categories))
}
