//! Core types for Amber Lane.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod gender;
pub mod id;
pub mod order_number;
pub mod payment;
pub mod status;

pub use email::{Email, EmailError};
pub use gender::Gender;
pub use id::*;
pub use order_number::{OrderNumber, OrderNumberError};
pub use payment::PaymentMethod;
pub use status::OrderStatus;
