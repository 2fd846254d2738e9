//! Entity kinds the admin can edit.
//!
//! Each kind is a zero-sized marker implementing [`FormEntity`]: which schema
//! validates it, how raw input becomes a request body, which backend call
//! saves it and which queries go stale afterwards. [`FormFlow`] is generic
//! over the marker.

use std::fmt;
use std::future::Future;

use frituur_client::{ApiError, CatalogApi, Invalidation};
use frituur_core::{FieldValues, Schema, ValidationErrors};

use crate::flow::FormFlow;

mod category;
mod product;

pub use category::Categories;
pub use product::Products;

/// Form for creating or editing a product.
pub type ProductForm = FormFlow<Products>;

/// Form for creating or editing a category.
pub type CategoryForm = FormFlow<Categories>;

/// An entity kind with a create/update form.
pub trait FormEntity {
    type Id: Copy + PartialEq + fmt::Debug + fmt::Display + Send + Sync;
    /// Request body for create and update.
    type Draft: fmt::Debug + Send + Sync;
    /// Entity as returned by the backend.
    type Saved: fmt::Debug + Send;

    /// Lowercase singular name, used in log lines and prompts.
    const KIND: &'static str;

    /// Field rules checked before any request is made.
    fn schema() -> &'static Schema;

    /// Turn validated input into a request body.
    ///
    /// Called only after [`schema`](Self::schema) accepted the values, so
    /// this handles what the schema cannot express.
    ///
    /// # Errors
    ///
    /// Returns the offending field if a value still does not convert.
    fn parse(values: &FieldValues) -> Result<Self::Draft, ValidationErrors>;

    /// Form input pre-filled from an existing entity.
    fn values_of(saved: &Self::Saved) -> FieldValues;

    fn id_of(saved: &Self::Saved) -> Self::Id;

    fn create(
        api: &impl CatalogApi,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Self::Saved, ApiError>> + Send;

    fn update(
        api: &impl CatalogApi,
        id: Self::Id,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Self::Saved, ApiError>> + Send;

    /// Queries made stale by a create.
    fn created(saved: &Self::Saved) -> Invalidation;

    /// Queries made stale by an update.
    fn updated(id: Self::Id) -> Invalidation;
}
