//! Domain and wire models for the storefront.
//!
//! Structs in `profile`, `order`, and `catalog` mirror the hosted store's
//! tables (snake_case columns); `checkout` carries the public API's
//! camelCase request/response shapes.

pub mod catalog;
pub mod checkout;
pub mod order;
pub mod profile;

pub use catalog::{Brand, Category, Product, ProductDetail, ProductImage, ProductPage, Review};
pub use checkout::{CheckoutItem, CheckoutRequest, OrderReceipt};
pub use order::{NewOrder, NewOrderItem, Order, OrderLineItem, OrderWithItems};
pub use profile::{NewProfile, Profile};
