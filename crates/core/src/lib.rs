//! Amber Lane Core - Shared types library.
//!
//! This crate provides common types used across all Amber Lane components:
//! - `storefront` - Public JSON API for catalog, checkout, and orders
//! - `cli` - Command-line tools for catalog seeding and management
//!
//! # Architecture
//!
//! The core crate contains only types and their parsing/generation helpers -
//! no HTTP clients, no persistence. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, order numbers,
//!   and the domain enums shared between the storefront and the CLI

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
