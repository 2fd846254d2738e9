//! Frituur Core - Shared domain types.
//!
//! This crate provides the types used across all Frituur components:
//! - `client` - REST client for the order/product service
//! - `storefront` - Cart and ordering page state
//! - `admin` - Product and category management forms
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices and the catalog/order entities
//! - [`validation`] - Declarative form validation schemas

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{FieldValues, Rule, Schema, ValidationErrors};
