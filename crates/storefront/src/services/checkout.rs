//! Order placement workflow with compensating rollback.
//!
//! The hosted store offers no cross-table transaction, so placing an order
//! is a saga: find-or-create the customer profile, insert the order row,
//! insert line items one at a time. After each completed write the service
//! records a compensation; on the first failure the recorded compensations
//! are unwound in reverse and the step's error is returned. A profile that
//! pre-existed before the call is never touched by the unwind.
//!
//! Each store call runs at most once: no step is retried, and a
//! compensation delete that itself fails is logged and reported but never
//! retried and never allowed to mask the step error that started the
//! unwind.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, instrument};

use amber_lane_core::{Email, OrderNumber, OrderStatus, PaymentMethod, ProductId, ProfileId};

use crate::models::{CheckoutRequest, NewOrder, NewOrderItem, NewProfile, OrderReceipt};
use crate::stores::{OrderItemStore, OrderStore, ProfileStore, StoreError};

/// One field-level validation failure, reported back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors from the order placement workflow, tagged by the step that
/// failed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The submission was rejected before any store call.
    #[error("invalid checkout submission ({} field error(s))", .0.len())]
    Validation(Vec<FieldError>),

    /// The profile lookup failed. Nothing was written; no compensation.
    #[error("profile lookup failed: {0}")]
    ProfileLookup(#[source] StoreError),

    /// Creating a new profile failed. Nothing was written; no compensation.
    #[error("profile create failed: {0}")]
    ProfileCreate(#[source] StoreError),

    /// The order insert failed; a freshly-created profile was rolled back.
    #[error("order create failed: {0}")]
    OrderCreate(#[source] StoreError),

    /// A line-item insert failed; items, order, and any freshly-created
    /// profile were rolled back.
    #[error("line item {index} create failed: {source}")]
    ItemCreate {
        index: usize,
        #[source]
        source: StoreError,
    },
}

/// A recorded corrective delete, to be issued if a later step fails.
///
/// Recorded in forward (write) order and unwound in reverse, so the unwind
/// removes line items before the order row and the order row before a
/// freshly-created profile.
#[derive(Debug, Clone, Copy)]
enum Compensation {
    RemoveProfile(ProfileId),
    RemoveOrder(amber_lane_core::OrderId),
    RemoveOrderItems(amber_lane_core::OrderId),
}

/// A checkout submission that passed validation.
#[derive(Debug)]
struct ValidatedCheckout {
    email: Email,
    full_name: String,
    phone: String,
    shipping_address: String,
    payment_method: PaymentMethod,
    total: Decimal,
    items: Vec<ValidatedItem>,
}

#[derive(Debug)]
struct ValidatedItem {
    product_id: ProductId,
    quantity: u32,
    unit_price: Decimal,
}

/// The order placement service.
///
/// Holds the three store seams as injected trait objects; client lifecycle
/// belongs to the surrounding application.
#[derive(Clone)]
pub struct CheckoutService {
    profiles: Arc<dyn ProfileStore>,
    orders: Arc<dyn OrderStore>,
    items: Arc<dyn OrderItemStore>,
}

impl CheckoutService {
    /// Create a new checkout service over the given stores.
    #[must_use]
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        orders: Arc<dyn OrderStore>,
        items: Arc<dyn OrderItemStore>,
    ) -> Self {
        Self {
            profiles,
            orders,
            items,
        }
    }

    /// Durably record one order with its line items, reusing or creating
    /// the customer profile as needed.
    ///
    /// On success an order row and all submitted line items exist. On any
    /// failure no order or line-item rows attributable to this call
    /// remain, and a profile is left behind only if it pre-existed.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` tagged with the step that failed; rollback
    /// has already run by the time the error is returned.
    #[instrument(skip(self, request), fields(email = %request.customer_email))]
    pub async fn place_order(
        &self,
        request: CheckoutRequest,
    ) -> Result<OrderReceipt, CheckoutError> {
        let checkout = validate(&request).map_err(CheckoutError::Validation)?;
        let mut compensations: Vec<Compensation> = Vec::new();

        // Step 1: resolve customer identity by exact email.
        let existing = self
            .profiles
            .find_by_email(&checkout.email)
            .await
            .map_err(CheckoutError::ProfileLookup)?;

        let profile_id = match existing {
            Some(profile) => {
                info!(profile_id = %profile.id, "Reusing existing profile");
                profile.id
            }
            None => {
                let profile = self
                    .profiles
                    .insert(NewProfile {
                        email: checkout.email.clone(),
                        full_name: checkout.full_name.clone(),
                        phone: checkout.phone.clone(),
                        is_admin: false,
                    })
                    .await
                    .map_err(CheckoutError::ProfileCreate)?;
                info!(profile_id = %profile.id, "Created new profile");
                compensations.push(Compensation::RemoveProfile(profile.id));
                profile.id
            }
        };

        // Step 2: draw the order number. Deliberately no uniqueness check;
        // a store-side collision surfaces as an order-insert failure.
        let order_number = OrderNumber::random();

        // Step 3: insert the order row.
        let order = match self
            .orders
            .insert(NewOrder {
                order_number: order_number.clone(),
                user_id: profile_id,
                total_amount: checkout.total,
                status: OrderStatus::Pending,
                payment_method: checkout.payment_method,
                shipping_address: checkout.shipping_address.clone(),
                placed_at: Utc::now(),
            })
            .await
        {
            Ok(order) => order,
            Err(err) => {
                self.unwind(&compensations).await;
                return Err(CheckoutError::OrderCreate(err));
            }
        };
        info!(order_id = %order.id, order_number = %order.order_number, "Created order");
        compensations.push(Compensation::RemoveOrder(order.id));
        compensations.push(Compensation::RemoveOrderItems(order.id));

        // Step 4: insert line items one at a time, in input order.
        for (index, item) in checkout.items.into_iter().enumerate() {
            let inserted = self
                .items
                .insert(NewOrderItem {
                    order_id: order.id,
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price: item.unit_price,
                })
                .await;

            if let Err(err) = inserted {
                self.unwind(&compensations).await;
                return Err(CheckoutError::ItemCreate { index, source: err });
            }
        }

        info!(order_id = %order.id, "Order placed");
        Ok(OrderReceipt {
            order_number: order.order_number,
            order_id: order.id,
        })
    }

    /// Issue the recorded compensations in reverse order.
    ///
    /// Best-effort: a failed delete is logged and captured but the unwind
    /// continues, and the caller still returns the original step error.
    async fn unwind(&self, compensations: &[Compensation]) {
        for compensation in compensations.iter().rev() {
            let result = match *compensation {
                Compensation::RemoveOrderItems(order_id) => {
                    self.items.delete_for_order(order_id).await
                }
                Compensation::RemoveOrder(order_id) => self.orders.delete(order_id).await,
                Compensation::RemoveProfile(profile_id) => self.profiles.delete(profile_id).await,
            };

            if let Err(err) = result {
                error!(
                    compensation = ?compensation,
                    error = %err,
                    "Compensation failed during checkout rollback"
                );
                sentry::capture_error(&err);
            }
        }
    }
}

/// Flatten the shipping fields into the stored single-string form.
fn flatten_shipping(address: &str, city: &str, state: &str, zip: &str) -> String {
    format!("{address}, {city}, {state}, {zip}")
}

/// Validate a checkout submission, collecting every field error.
fn validate(request: &CheckoutRequest) -> Result<ValidatedCheckout, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = request.customer_name.trim();
    if name.len() < 2 {
        errors.push(FieldError::new(
            "customerName",
            "must be at least 2 characters",
        ));
    }

    let email = match Email::parse(request.customer_email.trim()) {
        Ok(email) => Some(email),
        Err(err) => {
            errors.push(FieldError::new("customerEmail", err.to_string()));
            None
        }
    };

    let phone = request.customer_phone.trim();
    if phone.len() < 10 {
        errors.push(FieldError::new(
            "customerPhone",
            "must be at least 10 characters",
        ));
    }

    if request.shipping_address.trim().len() < 10 {
        errors.push(FieldError::new(
            "shippingAddress",
            "must be at least 10 characters",
        ));
    }
    if request.shipping_city.trim().len() < 2 {
        errors.push(FieldError::new(
            "shippingCity",
            "must be at least 2 characters",
        ));
    }
    if request.shipping_state.trim().len() < 2 {
        errors.push(FieldError::new(
            "shippingState",
            "must be at least 2 characters",
        ));
    }
    if request.shipping_zip.trim().len() < 5 {
        errors.push(FieldError::new(
            "shippingZip",
            "must be at least 5 characters",
        ));
    }

    let payment_method = match request.payment_method.parse::<PaymentMethod>() {
        Ok(method) => Some(method),
        Err(_) => {
            errors.push(FieldError::new(
                "paymentMethod",
                "must be one of: COD, JAZZCASH",
            ));
            None
        }
    };

    if request.total <= Decimal::ZERO {
        errors.push(FieldError::new("total", "must be positive"));
    }

    let mut items = Vec::with_capacity(request.items.len());
    for (index, item) in request.items.iter().enumerate() {
        let mut item_ok = true;

        if item.quantity < 1 {
            errors.push(FieldError::new("items", format!("item {index}: quantity must be at least 1")));
            item_ok = false;
        }
        if item.unit_price < Decimal::ZERO {
            errors.push(FieldError::new(
                "items",
                format!("item {index}: unit price cannot be negative"),
            ));
            item_ok = false;
        }

        match ProductId::parse(item.product_id.trim()) {
            Ok(product_id) if item_ok => items.push(ValidatedItem {
                product_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
            }),
            Ok(_) => {}
            Err(_) => {
                errors.push(FieldError::new(
                    "items",
                    format!("item {index}: product id cannot be empty"),
                ));
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Unreachable: every None above pushed an error.
    let (Some(email), Some(payment_method)) = (email, payment_method) else {
        return Err(errors);
    };

    Ok(ValidatedCheckout {
        email,
        full_name: name.to_string(),
        phone: phone.to_string(),
        shipping_address: flatten_shipping(
            request.shipping_address.trim(),
            request.shipping_city.trim(),
            request.shipping_state.trim(),
            request.shipping_zip.trim(),
        ),
        payment_method,
        total: request.total,
        items,
    })
}
