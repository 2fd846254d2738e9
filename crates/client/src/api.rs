//! Backend operations, as traits.
//!
//! Each method is one request: no retry, no backoff. Storefront and admin
//! flows take `&impl CatalogApi` / `&impl OrderApi` so they can run against
//! [`ApiClient`](crate::ApiClient) or an in-memory stand-in.

use std::future::Future;

use frituur_core::{
    Category, CategoryDraft, CategoryId, CustomerId, Order, OrderDraft, Product, ProductDraft,
    ProductId,
};

use crate::error::ApiError;

/// Products and categories.
pub trait CatalogApi: Send + Sync {
    /// `GET /products`
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// `GET /products/{id}`
    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// `POST /products`
    fn create_product(
        &self,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// `PUT /products/{id}`
    fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// `DELETE /products/{id}`
    fn delete_product(&self, id: ProductId) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `GET /categories`
    fn list_categories(&self) -> impl Future<Output = Result<Vec<Category>, ApiError>> + Send;

    /// `POST /categories`
    fn create_category(
        &self,
        draft: &CategoryDraft,
    ) -> impl Future<Output = Result<Category, ApiError>> + Send;

    /// `PUT /categories/{id}`
    fn update_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> impl Future<Output = Result<Category, ApiError>> + Send;

    /// `DELETE /categories/{id}`
    fn delete_category(&self, id: CategoryId)
    -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Pickup orders.
pub trait OrderApi: Send + Sync {
    /// `GET /orders`
    fn list_orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send;

    /// `GET /orders/user/{customer_id}`
    fn list_orders_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send;

    /// `POST /orders`
    fn create_order(
        &self,
        draft: &OrderDraft,
    ) -> impl Future<Output = Result<Order, ApiError>> + Send;
}
