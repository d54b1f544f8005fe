//! In-memory fakes for the checkout store seams, with per-step failure
//! injection and a record of every compensation delete.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use amber_lane_core::{Email, OrderId, OrderItemId, ProfileId};
use amber_lane_storefront::models::{
    NewOrder, NewOrderItem, NewProfile, Order, OrderLineItem, Profile,
};
use amber_lane_storefront::stores::{OrderItemStore, OrderStore, ProfileStore, StoreError};

/// Shared state behind all three fake stores.
#[derive(Default)]
pub struct StoreState {
    pub profiles: Vec<Profile>,
    pub orders: Vec<Order>,
    pub items: Vec<OrderLineItem>,

    /// Fail the next profile insert.
    pub fail_profile_insert: bool,
    /// Fail the next order insert.
    pub fail_order_insert: bool,
    /// Fail the Nth item insert of this run (0-based).
    pub fail_item_insert_at: Option<usize>,
    /// Make every delete fail (compensation-failure injection).
    pub fail_deletes: bool,

    item_insert_calls: usize,
    /// Tables hit by delete calls, in order.
    pub delete_log: Vec<&'static str>,
}

/// One fake client implementing all three store traits, like the real one.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::unwrap_used)]
    pub fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }

    /// Insert a profile directly, bypassing the workflow (test seeding).
    pub fn seed_profile(&self, email: &str) -> ProfileId {
        let profile = Profile {
            id: ProfileId::new(),
            email: Email::parse(email).expect("valid seed email"),
            full_name: "Seeded Customer".to_string(),
            phone: "03000000000".to_string(),
            is_admin: false,
            created_at: Utc::now(),
        };
        let id = profile.id;
        self.state().profiles.push(profile);
        id
    }

    pub fn profiles_for(&self, email: &str) -> usize {
        self.state()
            .profiles
            .iter()
            .filter(|p| p.email.as_str() == email)
            .count()
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Profile>, StoreError> {
        let state = self.state();
        Ok(state.profiles.iter().find(|p| p.email == *email).cloned())
    }

    async fn insert(&self, profile: NewProfile) -> Result<Profile, StoreError> {
        let mut state = self.state();
        if state.fail_profile_insert {
            return Err(StoreError::Backend("injected profile failure".to_string()));
        }
        let stored = Profile {
            id: ProfileId::new(),
            email: profile.email,
            full_name: profile.full_name,
            phone: profile.phone,
            is_admin: profile.is_admin,
            created_at: Utc::now(),
        };
        state.profiles.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: ProfileId) -> Result<(), StoreError> {
        let mut state = self.state();
        state.delete_log.push("user_profiles");
        if state.fail_deletes {
            return Err(StoreError::Backend("injected delete failure".to_string()));
        }
        state.profiles.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut state = self.state();
        if state.fail_order_insert {
            return Err(StoreError::Backend("injected order failure".to_string()));
        }
        let stored = Order {
            id: OrderId::new(),
            order_number: order.order_number,
            user_id: order.user_id,
            total_amount: order.total_amount,
            status: order.status,
            payment_method: order.payment_method,
            shipping_address: order.shipping_address,
            placed_at: order.placed_at,
        };
        state.orders.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: OrderId) -> Result<(), StoreError> {
        let mut state = self.state();
        state.delete_log.push("orders");
        if state.fail_deletes {
            return Err(StoreError::Backend("injected delete failure".to_string()));
        }
        state.orders.retain(|o| o.id != id);
        Ok(())
    }
}

#[async_trait]
impl OrderItemStore for InMemoryStore {
    async fn insert(&self, item: NewOrderItem) -> Result<OrderLineItem, StoreError> {
        let mut state = self.state();
        let call = state.item_insert_calls;
        state.item_insert_calls += 1;
        if state.fail_item_insert_at == Some(call) {
            return Err(StoreError::Backend("injected item failure".to_string()));
        }
        let stored = OrderLineItem {
            id: OrderItemId::new(),
            order_id: item.order_id,
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
        };
        state.items.push(stored.clone());
        Ok(stored)
    }

    async fn delete_for_order(&self, order_id: OrderId) -> Result<(), StoreError> {
        let mut state = self.state();
        state.delete_log.push("order_items");
        if state.fail_deletes {
            return Err(StoreError::Backend("injected delete failure".to_string()));
        }
        state.items.retain(|i| i.order_id != order_id);
        Ok(())
    }
}
