//! Frituur client library.
//!
//! Typed access to the order/product REST service.
//!
//! # Architecture
//!
//! - [`CatalogApi`] and [`OrderApi`] describe the backend operations; the
//!   storefront and admin flows are generic over them.
//! - [`ApiClient`] implements both over `reqwest`. Credentials are part of
//!   the client's [`ApiConfig`] and attached per request, never stored as
//!   shared default headers.
//! - [`QueryCache`] holds read-only copies of backend data (`moka`, TTL
//!   bounded). Mutations report what they made stale as an [`Invalidation`].
//!
//! # Example
//!
//! ```rust,ignore
//! use frituur_client::{ApiClient, ApiConfig, QueryCache};
//!
//! let config = ApiConfig::from_env()?;
//! let client = ApiClient::new(&config)?;
//! let cache = QueryCache::new(&config);
//!
//! let products = cache.products(&client).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;

pub use api::{CatalogApi, OrderApi};
pub use cache::{Invalidation, QueryCache, QueryKey};
pub use client::ApiClient;
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
