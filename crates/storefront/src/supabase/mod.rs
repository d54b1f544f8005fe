//! Hosted-store (Supabase) client speaking PostgREST conventions.
//!
//! One `reqwest`-backed client carries the service-role key on every request
//! and exposes typed helpers for the REST verbs. The checkout store traits
//! are implemented in `profiles` and `orders`; catalog reads (with a
//! 5-minute `moka` cache for brands, categories, and product detail) live in
//! `catalog`.

mod cache;
mod catalog;
mod client;
mod orders;
mod profiles;

pub use catalog::{NewProduct, ProductFilter, ProductSort};
pub use client::{SupabaseClient, SupabaseError};
