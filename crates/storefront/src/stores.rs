//! Store seams consumed by the checkout workflow.
//!
//! The workflow takes these three interfaces as injected trait objects so
//! that client lifecycle stays with `main` and tests can substitute
//! in-memory fakes with failure injection. `SupabaseClient` implements all
//! three against the hosted store.

use async_trait::async_trait;
use thiserror::Error;

use amber_lane_core::{Email, OrderId, ProfileId};

use crate::models::{NewOrder, NewOrderItem, NewProfile, Order, OrderLineItem, Profile};

/// Errors surfaced by a store operation.
///
/// The hosted store is an opaque networked service: every failure mode
/// (unreachable, rejected write, constraint violation) collapses into
/// `Backend` with the upstream message preserved.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing store rejected or failed the operation.
    #[error("store error: {0}")]
    Backend(String),
    /// The requested row does not exist.
    #[error("not found")]
    NotFound,
}

/// Customer-profile persistence (`user_profiles`).
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Look up a profile by exact email match.
    async fn find_by_email(&self, email: &Email) -> Result<Option<Profile>, StoreError>;

    /// Insert a new profile; the store assigns the id.
    async fn insert(&self, profile: NewProfile) -> Result<Profile, StoreError>;

    /// Delete a profile row. Used only as rollback compensation.
    async fn delete(&self, id: ProfileId) -> Result<(), StoreError>;
}

/// Order persistence (`orders`).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a new order; the store assigns the id.
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError>;

    /// Delete an order row. Used only as rollback compensation.
    async fn delete(&self, id: OrderId) -> Result<(), StoreError>;
}

/// Order-line-item persistence (`order_items`).
#[async_trait]
pub trait OrderItemStore: Send + Sync {
    /// Insert one line item; the store assigns the id.
    async fn insert(&self, item: NewOrderItem) -> Result<OrderLineItem, StoreError>;

    /// Bulk-delete every line item belonging to an order.
    ///
    /// Compensation deletes items explicitly before the order row; no
    /// cascade behavior is assumed of the store.
    async fn delete_for_order(&self, order_id: OrderId) -> Result<(), StoreError>;
}
