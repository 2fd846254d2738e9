//! Command implementations.

use frituur_admin::FormError;
use frituur_client::{ApiClient, ApiError, ConfigError, QueryCache};
use frituur_storefront::{CartError, CheckoutError};
use thiserror::Error;

pub mod catalog;
pub mod orders;

/// What every command needs.
pub struct Context<'a> {
    pub client: &'a ApiClient,
    pub cache: &'a QueryCache,
}

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("Could not read confirmation: {0}")]
    Prompt(#[from] std::io::Error),

    /// The user declined the confirmation prompt.
    #[error("Aborted")]
    Aborted,
}
