//! Shopfront library.
//!
//! Client-side state for a demo store: a cart and a wishlist that survive
//! restarts through a key/value store, a product catalog behind an async
//! lookup trait, listing filters, and a simulated checkout.
//!
//! Pages build one [`state::AppState`] at startup and drive the stores through
//! it. Store operations never fail; only catalog lookups and checkout return
//! errors.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod notify;
pub mod search;
pub mod state;
pub mod storage;
pub mod wishlist;
