//! `reqwest` implementation of the backend traits.

use std::sync::Arc;

use frituur_core::{
    Category, CategoryDraft, CategoryId, CustomerId, Order, OrderDraft, Product, ProductDraft,
    ProductId,
};
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::api::{CatalogApi, OrderApi};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// How much of an error body to keep in logs and error messages.
const ERROR_BODY_EXCERPT: usize = 200;

/// Client for the order/product REST service.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("token", &self.inner.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("frituur/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
                token: config.token.clone(),
            }),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Build an unauthenticated request.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.inner.client.request(method, self.url(path)?))
    }

    /// Build a request carrying the configured bearer token.
    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let builder = self.request(method, path)?;
        Ok(match &self.inner.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => {
                debug!(path, "No API token configured, sending mutation unauthenticated");
                builder
            }
        })
    }

    /// Send a request and decode a JSON body.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&body),
                "Failed to parse API response"
            );
            ApiError::Parse(e)
        })
    }

    /// Send a request, returning the body text of a success response.
    async fn send(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&body),
                "API returned non-success status"
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: excerpt(&body),
            });
        }

        Ok(body)
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(ERROR_BODY_EXCERPT).collect()
}

// =============================================================================
// Catalog
// =============================================================================

impl CatalogApi for ApiClient {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.send_json(self.request(Method::GET, "products")?).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.send_json(self.request(Method::GET, &format!("products/{id}"))?)
            .await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        let request = self.authorized(Method::POST, "products")?.json(draft);
        self.send_json(request).await
    }

    #[instrument(skip(self, draft), fields(product_id = %id))]
    async fn update_product(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, ApiError> {
        let request = self
            .authorized(Method::PUT, &format!("products/{id}"))?
            .json(draft);
        self.send_json(request).await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.send(self.authorized(Method::DELETE, &format!("products/{id}"))?)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.send_json(self.request(Method::GET, "categories")?).await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ApiError> {
        let request = self.authorized(Method::POST, "categories")?.json(draft);
        self.send_json(request).await
    }

    #[instrument(skip(self, draft), fields(category_id = %id))]
    async fn update_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Category, ApiError> {
        let request = self
            .authorized(Method::PUT, &format!("categories/{id}"))?
            .json(draft);
        self.send_json(request).await
    }

    #[instrument(skip(self), fields(category_id = %id))]
    async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        self.send(self.authorized(Method::DELETE, &format!("categories/{id}"))?)
            .await?;
        Ok(())
    }
}

// =============================================================================
// Orders
// =============================================================================

impl OrderApi for ApiClient {
    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.send_json(self.request(Method::GET, "orders")?).await
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn list_orders_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>, ApiError> {
        self.send_json(self.request(Method::GET, &format!("orders/user/{customer_id}"))?)
            .await
    }

    #[instrument(skip(self, draft), fields(customer_id = %draft.customer_id))]
    async fn create_order(&self, draft: &OrderDraft) -> Result<Order, ApiError> {
        let request = self.request(Method::POST, "orders")?.json(draft);
        self.send_json(request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ApiConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn test_paths_join_under_base() {
        let client = client("http://localhost:8080/api");
        assert_eq!(
            client.url("products/7").unwrap().as_str(),
            "http://localhost:8080/api/products/7"
        );
        assert_eq!(
            client.url("orders/user/3").unwrap().as_str(),
            "http://localhost:8080/api/orders/user/3"
        );
    }

    #[test]
    fn test_mutations_carry_bearer_token() {
        let config = ApiConfig::new("http://localhost:8080")
            .unwrap()
            .with_token(SecretString::from("jwt-abc"));
        let client = ApiClient::new(&config).unwrap();

        let request = client
            .authorized(Method::DELETE, "products/7")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer jwt-abc"
        );
    }

    #[test]
    fn test_reads_carry_no_token() {
        let config = ApiConfig::new("http://localhost:8080")
            .unwrap()
            .with_token(SecretString::from("jwt-abc"));
        let client = ApiClient::new(&config).unwrap();

        let request = client
            .request(Method::GET, "products")
            .unwrap()
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ApiConfig::new("http://localhost:8080")
            .unwrap()
            .with_token(SecretString::from("jwt-abc"));
        let debug = format!("{:?}", ApiClient::new(&config).unwrap());
        assert!(!debug.contains("jwt-abc"));
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(500);
        assert_eq!(excerpt(&long).len(), ERROR_BODY_EXCERPT);
    }
}
