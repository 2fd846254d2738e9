//! Frituur Admin library.
//!
//! Create, edit and delete products and categories.
//!
//! # Flows
//!
//! - [`FormFlow`] drives one entity form: validate locally, submit once,
//!   report what went stale on success.
//! - [`PendingDeletion`] is the confirmation step in front of every delete.
//!
//! Neither flow touches a cache. Callers pass an `on_success` callback that
//! receives an [`Invalidation`](frituur_client::Invalidation) and decides
//! what to refresh.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod confirm;
pub mod error;
pub mod flow;
pub mod forms;

pub use confirm::{CONFIRM_TITLE, Deletable, PendingDeletion};
pub use error::FormError;
pub use flow::{FormFlow, FormState, Submission};
pub use forms::{Categories, CategoryForm, FormEntity, ProductForm, Products};
