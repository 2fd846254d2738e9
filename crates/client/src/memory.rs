//! In-memory backend for tests.
//!
//! Implements [`CatalogApi`] and [`OrderApi`] over plain collections and
//! records every call, so flows can assert exactly which requests they made.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use frituur_core::{
    Category, CategoryDraft, CategoryId, CustomerId, Order, OrderDraft, OrderId, Product,
    ProductDraft, ProductId,
};

use crate::api::{CatalogApi, OrderApi};
use crate::error::ApiError;

/// A request received by [`MemoryBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListProducts,
    GetProduct(ProductId),
    CreateProduct(ProductDraft),
    UpdateProduct(ProductId, ProductDraft),
    DeleteProduct(ProductId),
    ListCategories,
    CreateCategory(CategoryDraft),
    UpdateCategory(CategoryId, CategoryDraft),
    DeleteCategory(CategoryId),
    ListOrders,
    ListCustomerOrders(CustomerId),
    CreateOrder(OrderDraft),
}

#[derive(Debug, Default)]
struct State {
    products: BTreeMap<ProductId, Product>,
    categories: BTreeMap<CategoryId, Category>,
    orders: Vec<Order>,
    next_id: i32,
    calls: Vec<Call>,
    fail_with: Option<u16>,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    /// Record a call and return the injected failure, if any.
    fn record(&mut self, call: Call) -> Result<(), ApiError> {
        self.calls.push(call);
        match self.fail_with {
            Some(status) => Err(ApiError::Api {
                status,
                message: "injected failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Api {
        status: 404,
        message: format!("{what} not found"),
    }
}

/// A backend that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

impl MemoryBackend {
    /// An empty backend. Server-assigned IDs start above 100.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 100,
                ..State::default()
            }),
        }
    }

    /// Seed products.
    #[must_use]
    pub fn with_products(self, products: impl IntoIterator<Item = Product>) -> Self {
        {
            let mut state = self.lock();
            for product in products {
                state.products.insert(product.id, product);
            }
        }
        self
    }

    /// Seed categories.
    #[must_use]
    pub fn with_categories(self, categories: impl IntoIterator<Item = Category>) -> Self {
        {
            let mut state = self.lock();
            for category in categories {
                state.categories.insert(category.id, category);
            }
        }
        self
    }

    /// Make every following call fail with this HTTP status; `None` heals.
    pub fn fail_with(&self, status: Option<u16>) {
        self.lock().fail_with = status;
    }

    /// Every call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Current products.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.lock().products.values().cloned().collect()
    }

    /// Current categories.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.lock().categories.values().cloned().collect()
    }

    /// Orders placed so far.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.lock().orders.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CatalogApi for MemoryBackend {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let mut state = self.lock();
        state.record(Call::ListProducts)?;
        Ok(state.products.values().cloned().collect())
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let mut state = self.lock();
        state.record(Call::GetProduct(id))?;
        state
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("product"))
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        let mut state = self.lock();
        state.record(Call::CreateProduct(draft.clone()))?;
        let id = ProductId::new(state.next_id());
        let product = draft.clone().into_product(id);
        state.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, ApiError> {
        let mut state = self.lock();
        state.record(Call::UpdateProduct(id, draft.clone()))?;
        let slot = state.products.get_mut(&id).ok_or_else(|| not_found("product"))?;
        *slot = draft.clone().into_product(id);
        Ok(slot.clone())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.record(Call::DeleteProduct(id))?;
        state
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("product"))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let mut state = self.lock();
        state.record(Call::ListCategories)?;
        Ok(state.categories.values().cloned().collect())
    }

    async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ApiError> {
        let mut state = self.lock();
        state.record(Call::CreateCategory(draft.clone()))?;
        let category = Category {
            id: CategoryId::new(state.next_id()),
            name: draft.name.clone(),
        };
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Category, ApiError> {
        let mut state = self.lock();
        state.record(Call::UpdateCategory(id, draft.clone()))?;
        let slot = state
            .categories
            .get_mut(&id)
            .ok_or_else(|| not_found("category"))?;
        slot.name.clone_from(&draft.name);
        Ok(slot.clone())
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.record(Call::DeleteCategory(id))?;
        state
            .categories
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("category"))
    }
}

impl OrderApi for MemoryBackend {
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let mut state = self.lock();
        state.record(Call::ListOrders)?;
        Ok(state.orders.clone())
    }

    async fn list_orders_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, ApiError> {
        let mut state = self.lock();
        state.record(Call::ListCustomerOrders(customer_id))?;
        Ok(state
            .orders
            .iter()
            .filter(|order| order.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn create_order(&self, draft: &OrderDraft) -> Result<Order, ApiError> {
        let mut state = self.lock();
        state.record(Call::CreateOrder(draft.clone()))?;
        let order = Order {
            id: OrderId::new(state.next_id()),
            customer_id: draft.customer_id,
            pickup: draft.pickup,
            product_ids: draft.product_ids.clone(),
        };
        state.orders.push(order.clone());
        Ok(order)
    }
}
