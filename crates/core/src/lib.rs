//! ModernShop Core - catalog, cart state and order totals.
//!
//! This crate holds everything the storefront needs to reason about a cart:
//! - `storefront` renders it and supplies a cookie-backed storage adapter
//!
//! # Architecture
//!
//! The core crate contains only types, pure functions and a storage trait - no
//! HTTP, no templates. Cart updates return new values; persistence goes
//! through [`cart::CartStorage`] so tests can swap in [`cart::MemoryStorage`].
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices
//! - [`catalog`] - The fixed product list and display categories
//! - [`cart`] - Cart state, storage trait and the cart store
//! - [`order`] - Line-item join and order totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod types;

pub use cart::{CartState, CartStorage, CartStore, MemoryStorage};
pub use catalog::{Category, Product};
pub use order::{CartLineItem, OrderSummary};
pub use types::*;
