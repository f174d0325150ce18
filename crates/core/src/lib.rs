//! Shopfront Core - Shared domain types.
//!
//! This crate provides the types shared by every Shopfront component:
//! - `shopfront` - Cart and wishlist stores, catalog, checkout
//! - `shopfront-integration-tests` - Cross-module scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no async runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and emails, plus
//!   the product catalog model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
