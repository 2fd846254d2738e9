//! Integration tests for Frituur.
//!
//! [`MockBackend`] serves the order/product service's REST surface from
//! memory on an ephemeral port and records every request it receives. The
//! tests in `tests/` drive the real HTTP client, storefront and admin flows
//! against it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p frituur-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use frituur_client::{ApiClient, ApiConfig};
use frituur_core::{
    Category, CategoryDraft, CategoryId, CustomerId, Order, OrderDraft, OrderId, Product,
    ProductDraft, ProductId,
};
use secrecy::SecretString;
use serde_json::Value;

/// Token the mock hands to clients built with [`MockBackend::authorized_client`].
pub const TEST_TOKEN: &str = "integration-test-token";

/// One request as the mock saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct Store {
    products: BTreeMap<ProductId, Product>,
    categories: BTreeMap<CategoryId, Category>,
    orders: Vec<Order>,
    next_id: i32,
    requests: Vec<RecordedRequest>,
    fail_with: Option<StatusCode>,
}

impl Store {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<Mutex<Store>>;

fn lock(store: &Shared) -> MutexGuard<'_, Store> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A running mock of the order/product service.
#[derive(Debug, Clone)]
pub struct MockBackend {
    addr: SocketAddr,
    store: Shared,
}

impl MockBackend {
    /// Bind an ephemeral port and start serving.
    pub async fn start() -> Self {
        let store = Shared::new(Mutex::new(Store {
            next_id: 100,
            ..Store::default()
        }));

        let app = Router::new()
            .route("/products", get(list_products).post(create_product))
            .route(
                "/products/{id}",
                get(get_product).put(update_product).delete(delete_product),
            )
            .route("/categories", get(list_categories).post(create_category))
            .route(
                "/categories/{id}",
                put(update_category).delete(delete_category),
            )
            .route("/orders", get(list_orders).post(create_order))
            .route("/orders/user/{id}", get(list_customer_orders))
            .layer(middleware::from_fn_with_state(store.clone(), record))
            .with_state(store.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve mock") });

        Self { addr, store }
    }

    /// Base URL of the mock service.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client configuration pointing at the mock, without a token.
    #[must_use]
    pub fn config(&self) -> ApiConfig {
        ApiConfig::new(&self.url()).expect("mock url")
    }

    /// A client without a token.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).expect("build client")
    }

    /// A client carrying [`TEST_TOKEN`].
    #[must_use]
    pub fn authorized_client(&self) -> ApiClient {
        let config = self
            .config()
            .with_token(SecretString::from(TEST_TOKEN.to_string()));
        ApiClient::new(&config).expect("build client")
    }

    #[must_use]
    pub fn with_product(self, product: Product) -> Self {
        lock(&self.store).products.insert(product.id, product);
        self
    }

    #[must_use]
    pub fn with_category(self, category: Category) -> Self {
        lock(&self.store).categories.insert(category.id, category);
        self
    }

    /// Answer every following request with this status; `None` heals.
    pub fn fail_with(&self, status: Option<StatusCode>) {
        lock(&self.store).fail_with = status;
    }

    /// Requests received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.store).requests.clone()
    }

    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        lock(&self.store).products.values().cloned().collect()
    }

    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        lock(&self.store).categories.values().cloned().collect()
    }

    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        lock(&self.store).orders.clone()
    }
}

/// Record the request, then either fail it or pass it on.
async fn record(State(store): State<Shared>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    let fail_with = {
        let mut store = lock(&store);
        store.requests.push(RecordedRequest {
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
            authorization: parts
                .headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
            body: serde_json::from_slice(&bytes).ok(),
        });
        store.fail_with
    };

    if let Some(status) = fail_with {
        return (status, "mock failure").into_response();
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

// =============================================================================
// Catalog
// =============================================================================

async fn list_products(State(store): State<Shared>) -> Json<Vec<Product>> {
    Json(lock(&store).products.values().cloned().collect())
}

async fn get_product(
    State(store): State<Shared>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, StatusCode> {
    lock(&store)
        .products
        .get(&ProductId::new(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_product(
    State(store): State<Shared>,
    Json(draft): Json<ProductDraft>,
) -> (StatusCode, Json<Product>) {
    let mut store = lock(&store);
    let product = draft.into_product(ProductId::new(store.next_id()));
    store.products.insert(product.id, product.clone());
    (StatusCode::CREATED, Json(product))
}

async fn update_product(
    State(store): State<Shared>,
    Path(id): Path<i32>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>, StatusCode> {
    let mut store = lock(&store);
    let slot = store
        .products
        .get_mut(&ProductId::new(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = draft.into_product(ProductId::new(id));
    Ok(Json(slot.clone()))
}

async fn delete_product(State(store): State<Shared>, Path(id): Path<i32>) -> StatusCode {
    match lock(&store).products.remove(&ProductId::new(id)) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn list_categories(State(store): State<Shared>) -> Json<Vec<Category>> {
    Json(lock(&store).categories.values().cloned().collect())
}

async fn create_category(
    State(store): State<Shared>,
    Json(draft): Json<CategoryDraft>,
) -> (StatusCode, Json<Category>) {
    let mut store = lock(&store);
    let category = Category {
        id: CategoryId::new(store.next_id()),
        name: draft.name,
    };
    store.categories.insert(category.id, category.clone());
    (StatusCode::CREATED, Json(category))
}

async fn update_category(
    State(store): State<Shared>,
    Path(id): Path<i32>,
    Json(draft): Json<CategoryDraft>,
) -> Result<Json<Category>, StatusCode> {
    let mut store = lock(&store);
    let slot = store
        .categories
        .get_mut(&CategoryId::new(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    slot.name = draft.name;
    Ok(Json(slot.clone()))
}

async fn delete_category(State(store): State<Shared>, Path(id): Path<i32>) -> StatusCode {
    match lock(&store).categories.remove(&CategoryId::new(id)) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

// =============================================================================
// Orders
// =============================================================================

async fn list_orders(State(store): State<Shared>) -> Json<Vec<Order>> {
    Json(lock(&store).orders.clone())
}

async fn list_customer_orders(
    State(store): State<Shared>,
    Path(id): Path<i32>,
) -> Json<Vec<Order>> {
    let customer = CustomerId::new(id);
    Json(
        lock(&store)
            .orders
            .iter()
            .filter(|order| order.customer_id == customer)
            .cloned()
            .collect(),
    )
}

async fn create_order(
    State(store): State<Shared>,
    Json(draft): Json<OrderDraft>,
) -> (StatusCode, Json<Order>) {
    let mut store = lock(&store);
    let order = Order {
        id: OrderId::new(store.next_id()),
        customer_id: draft.customer_id,
        pickup: draft.pickup,
        product_ids: draft.product_ids,
    };
    store.orders.push(order.clone());
    (StatusCode::CREATED, Json(order))
}
