//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use amber_lane_core::Gender;

use crate::error::Result;
use crate::models::{ProductDetail, ProductPage};
use crate::state::AppState;
use crate::supabase::{ProductFilter, ProductSort};

/// Product listing query parameters (`?category=floral&sort=price-asc&...`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    /// `ALL` (or anything unrecognized) means no gender filter.
    pub gender: Option<String>,
    pub search: Option<String>,
    pub featured: Option<bool>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: Option<ProductSort>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl From<ProductListQuery> for ProductFilter {
    fn from(query: ProductListQuery) -> Self {
        Self {
            category: query.category,
            brand: query.brand,
            gender: query
                .gender
                .as_deref()
                .and_then(|g| g.parse::<Gender>().ok()),
            search: query.search.filter(|s| !s.is_empty()),
            featured: query.featured,
            min_price: query.min_price,
            max_price: query.max_price,
            sort: query.sort.unwrap_or_default(),
            page: query.page.unwrap_or(1),
            limit: query.limit.unwrap_or(20),
        }
    }
}

/// Fetch one page of the product listing.
///
/// `GET /api/products`
///
/// # Errors
///
/// Returns `502` if the hosted store is unreachable.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductPage>> {
    let filter = ProductFilter::from(query);
    let page = state.supabase().list_products(&filter).await?;
    Ok(Json(page))
}

/// Fetch a product by slug with brand, category, images, and reviews.
///
/// `GET /api/products/{slug}`
///
/// # Errors
///
/// Returns `404` if no product carries the slug.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductDetail>> {
    let detail = state.supabase().get_product_by_slug(&slug).await?;
    Ok(Json(detail))
}
