//! `OrderStore`/`OrderItemStore` implementations plus order reads.

use async_trait::async_trait;
use tracing::instrument;

use amber_lane_core::{OrderId, OrderNumber};

use crate::models::{NewOrder, NewOrderItem, Order, OrderLineItem, OrderWithItems};
use crate::stores::{OrderItemStore, OrderStore, StoreError};

use super::client::{SupabaseClient, SupabaseError};

#[async_trait]
impl OrderStore for SupabaseClient {
    #[instrument(skip(self, order), fields(order_number = %order.order_number))]
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError> {
        let created = self.insert_returning("orders", &order).await?;
        Ok(created)
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn delete(&self, id: OrderId) -> Result<(), StoreError> {
        self.delete_rows("orders", &format!("id=eq.{id}")).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderItemStore for SupabaseClient {
    #[instrument(skip(self, item), fields(order_id = %item.order_id))]
    async fn insert(&self, item: NewOrderItem) -> Result<OrderLineItem, StoreError> {
        let created = self.insert_returning("order_items", &item).await?;
        Ok(created)
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    async fn delete_for_order(&self, order_id: OrderId) -> Result<(), StoreError> {
        self.delete_rows("order_items", &format!("order_id=eq.{order_id}"))
            .await?;
        Ok(())
    }
}

impl SupabaseClient {
    /// Fetch an order and its line items by customer-facing order number.
    ///
    /// Order numbers are not guaranteed unique; if a collision ever lands,
    /// this returns the first match the store yields.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::NotFound` if no order carries the number.
    #[instrument(skip(self), fields(order_number = %order_number))]
    pub async fn get_order_by_number(
        &self,
        order_number: &OrderNumber,
    ) -> Result<OrderWithItems, SupabaseError> {
        let query = format!(
            "select=*,order_items(*)&order_number=eq.{}&limit=1",
            order_number.as_str()
        );
        self.select_one("orders", &query).await
    }

    /// List every order, newest first (admin back-office listing).
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderWithItems>, SupabaseError> {
        self.select("orders", "select=*,order_items(*)&order=placed_at.desc")
            .await
    }
}
