//! Storefront errors.

use frituur_client::ApiError;
use frituur_core::ProductId;
use thiserror::Error;

/// Errors from cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product is not part of the loaded catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),
}

/// Errors from checking out the cart.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// The order service rejected or never received the order.
    #[error("Failed to place order: {0}")]
    Api(#[from] ApiError),
}
