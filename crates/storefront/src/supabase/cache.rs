//! Cache types for hosted-store catalog responses.

use crate::models::{Brand, Category, ProductDetail};

/// Cached value types.
///
/// Only catalog reads are cached; orders and profiles always go to the
/// store.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Brands(Vec<Brand>),
    Categories(Vec<Category>),
    Product(Box<ProductDetail>),
}
