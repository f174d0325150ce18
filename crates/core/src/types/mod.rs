//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use product::{ALL_CATEGORIES, Category, CategoryFilter, Product};
pub use status::*;
