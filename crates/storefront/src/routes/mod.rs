//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! # Orders
//! POST /api/orders                 - Place an order (checkout)
//! GET  /api/orders/{order_number}  - Order lookup with line items
//!
//! # Catalog
//! GET  /api/products               - Product listing (filter/sort/paginate)
//! GET  /api/products/{slug}        - Product detail with reviews
//! GET  /api/brands                 - Brand listing
//! GET  /api/categories             - Category listing
//!
//! # Admin back-office (gated at the network layer)
//! GET  /api/admin/orders           - All orders, newest first
//! GET  /api/admin/users            - All customer profiles
//! ```

pub mod admin;
pub mod catalog;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create))
        .route("/{order_number}", get(orders::show))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the admin back-office routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(admin::orders))
        .route("/users", get(admin::users))
}

/// Create all routes for the storefront API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/orders", order_routes())
        .nest("/api/products", product_routes())
        .route("/api/brands", get(catalog::brands))
        .route("/api/categories", get(catalog::categories))
        .nest("/api/admin", admin_routes())
}
