//! Core types for Frituur.
//!
//! This module provides type-safe wrappers for common domain concepts and
//! the entities exchanged with the order/product service.

pub mod category;
pub mod id;
pub mod order;
pub mod price;
pub mod product;

pub use category::{Category, CategoryDraft};
pub use id::*;
pub use order::{Order, OrderDraft};
pub use price::{Price, PriceError};
pub use product::{Product, ProductDraft};
