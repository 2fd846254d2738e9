//! Frituur Storefront library.
//!
//! The customer-facing ordering page as plain state: browse the catalog by
//! category, collect products in a cart, and check out a pickup order.
//!
//! # Modules
//!
//! - [`cart`] - Session-local cart
//! - [`catalog`] - Category filter for the product list
//! - [`order_page`] - The ordering page session tying the two together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod error;
pub mod order_page;

pub use cart::{Cart, CartSummaryLine};
pub use catalog::filter_by_category;
pub use error::{CartError, CheckoutError};
pub use order_page::OrderPage;
