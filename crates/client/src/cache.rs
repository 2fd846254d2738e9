//! Query cache for backend reads.
//!
//! Reads go through the cache; mutations never touch it directly. Instead a
//! successful mutation produces an [`Invalidation`] naming the queries it
//! made stale, and whoever owns the cache applies it. The next read of an
//! invalidated query refetches from the backend.

use std::time::Duration;

use frituur_core::{Category, CustomerId, Order, Product, ProductId};
use moka::future::Cache;
use tracing::debug;

use crate::api::{CatalogApi, OrderApi};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// Identifies one cached query.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum QueryKey {
    Products,
    Product(ProductId),
    Categories,
    Orders,
    CustomerOrders(CustomerId),
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Vec<Product>),
    Product(Box<Product>),
    Categories(Vec<Category>),
    Orders(Vec<Order>),
}

/// The queries a successful mutation made stale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invalidation {
    keys: Vec<QueryKey>,
}

impl Invalidation {
    /// Invalidate exactly these queries.
    #[must_use]
    pub fn of(keys: impl IntoIterator<Item = QueryKey>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn product_created() -> Self {
        Self::of([QueryKey::Products])
    }

    #[must_use]
    pub fn product_updated(id: ProductId) -> Self {
        Self::of([QueryKey::Products, QueryKey::Product(id)])
    }

    #[must_use]
    pub fn product_deleted(id: ProductId) -> Self {
        Self::of([QueryKey::Products, QueryKey::Product(id)])
    }

    #[must_use]
    pub fn category_saved() -> Self {
        Self::of([QueryKey::Categories])
    }

    /// Products reference categories, so the product list goes stale too.
    #[must_use]
    pub fn category_deleted() -> Self {
        Self::of([QueryKey::Categories, QueryKey::Products])
    }

    #[must_use]
    pub fn order_created(customer_id: CustomerId) -> Self {
        Self::of([QueryKey::Orders, QueryKey::CustomerOrders(customer_id)])
    }

    /// The stale queries.
    #[must_use]
    pub fn keys(&self) -> &[QueryKey] {
        &self.keys
    }

    /// Returns true if `key` is among the stale queries.
    #[must_use]
    pub fn touches(&self, key: QueryKey) -> bool {
        self.keys.contains(&key)
    }
}

/// Read-through cache of backend query results.
#[derive(Clone)]
pub struct QueryCache {
    cache: Cache<QueryKey, CacheValue>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl QueryCache {
    /// Create a cache sized and timed from the client configuration.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_ttl(config.cache_capacity, config.cache_ttl)
    }

    /// Create a cache with explicit limits.
    #[must_use]
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// All products.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is cold and the fetch fails.
    pub async fn products(&self, api: &impl CatalogApi) -> Result<Vec<Product>, ApiError> {
        if let Some(CacheValue::Products(products)) = self.cache.get(&QueryKey::Products).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products = api.list_products().await?;
        self.cache
            .insert(QueryKey::Products, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// One product.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is cold and the fetch fails.
    pub async fn product(&self, api: &impl CatalogApi, id: ProductId) -> Result<Product, ApiError> {
        let key = QueryKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.cache.get(&key).await {
            debug!(product_id = %id, "Cache hit for product");
            return Ok(*product);
        }

        let product = api.get_product(id).await?;
        self.cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// All categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is cold and the fetch fails.
    pub async fn categories(&self, api: &impl CatalogApi) -> Result<Vec<Category>, ApiError> {
        if let Some(CacheValue::Categories(categories)) =
            self.cache.get(&QueryKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories = api.list_categories().await?;
        self.cache
            .insert(
                QueryKey::Categories,
                CacheValue::Categories(categories.clone()),
            )
            .await;
        Ok(categories)
    }

    /// All orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is cold and the fetch fails.
    pub async fn orders(&self, api: &impl OrderApi) -> Result<Vec<Order>, ApiError> {
        if let Some(CacheValue::Orders(orders)) = self.cache.get(&QueryKey::Orders).await {
            debug!("Cache hit for orders");
            return Ok(orders);
        }

        let orders = api.list_orders().await?;
        self.cache
            .insert(QueryKey::Orders, CacheValue::Orders(orders.clone()))
            .await;
        Ok(orders)
    }

    /// One customer's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is cold and the fetch fails.
    pub async fn customer_orders(
        &self,
        api: &impl OrderApi,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, ApiError> {
        let key = QueryKey::CustomerOrders(customer_id);
        if let Some(CacheValue::Orders(orders)) = self.cache.get(&key).await {
            debug!(customer_id = %customer_id, "Cache hit for customer orders");
            return Ok(orders);
        }

        let orders = api.list_orders_for_customer(customer_id).await?;
        self.cache
            .insert(key, CacheValue::Orders(orders.clone()))
            .await;
        Ok(orders)
    }

    /// Evict every query named by `invalidation`.
    pub async fn apply(&self, invalidation: &Invalidation) {
        for key in invalidation.keys() {
            debug!(?key, "Invalidating cached query");
            self.cache.invalidate(key).await;
        }
    }

    /// Returns true if `key` currently has a cached result.
    pub async fn is_cached(&self, key: QueryKey) -> bool {
        self.cache.get(&key).await.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use frituur_core::{Category, CategoryId, Price};

    use super::*;
    use crate::memory::{Call, MemoryBackend};

    fn backend() -> MemoryBackend {
        MemoryBackend::new()
            .with_products([Product {
                id: ProductId::new(1),
                name: "Fries".to_string(),
                description: None,
                price: Price::from_cents(250),
                url: None,
                category_id: CategoryId::new(1),
            }])
            .with_categories([Category {
                id: CategoryId::new(1),
                name: "Snacks".to_string(),
            }])
    }

    fn cache() -> QueryCache {
        QueryCache::with_ttl(100, Duration::from_secs(60))
    }

    fn count(api: &MemoryBackend, call: &Call) -> usize {
        api.calls().iter().filter(|c| *c == call).count()
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let api = backend();
        let cache = cache();

        cache.products(&api).await.unwrap();
        let products = cache.products(&api).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(count(&api, &Call::ListProducts), 1);
        assert!(cache.is_cached(QueryKey::Products).await);
    }

    #[tokio::test]
    async fn test_invalidation_forces_refetch() {
        let api = backend();
        let cache = cache();

        cache.products(&api).await.unwrap();
        cache.apply(&Invalidation::product_created()).await;
        assert!(!cache.is_cached(QueryKey::Products).await);

        cache.products(&api).await.unwrap();
        assert_eq!(count(&api, &Call::ListProducts), 2);
    }

    #[tokio::test]
    async fn test_invalidation_leaves_other_queries() {
        let api = backend();
        let cache = cache();

        cache.products(&api).await.unwrap();
        cache.categories(&api).await.unwrap();
        cache.apply(&Invalidation::category_saved()).await;

        assert!(cache.is_cached(QueryKey::Products).await);
        assert!(!cache.is_cached(QueryKey::Categories).await);
    }

    #[tokio::test]
    async fn test_product_detail_is_cached_per_id() {
        let api = backend();
        let cache = cache();
        let id = ProductId::new(1);

        cache.product(&api, id).await.unwrap();
        cache.product(&api, id).await.unwrap();
        assert_eq!(count(&api, &Call::GetProduct(id)), 1);

        cache.apply(&Invalidation::product_updated(id)).await;
        assert!(!cache.is_cached(QueryKey::Product(id)).await);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let api = backend();
        let cache = cache();

        api.fail_with(Some(500));
        assert!(cache.products(&api).await.is_err());
        assert!(!cache.is_cached(QueryKey::Products).await);

        api.fail_with(None);
        assert!(cache.products(&api).await.is_ok());
    }

    #[tokio::test]
    async fn test_order_created_invalidates_customer_orders() {
        let api = backend();
        let cache = cache();
        let customer = CustomerId::new(3);

        cache.customer_orders(&api, customer).await.unwrap();
        cache.orders(&api).await.unwrap();
        cache.apply(&Invalidation::order_created(customer)).await;

        assert!(!cache.is_cached(QueryKey::Orders).await);
        assert!(!cache.is_cached(QueryKey::CustomerOrders(customer)).await);
    }

    #[test]
    fn test_invalidation_policy() {
        let id = ProductId::new(7);
        assert_eq!(Invalidation::product_created().keys(), &[QueryKey::Products]);
        assert!(Invalidation::product_updated(id).touches(QueryKey::Product(id)));
        assert!(Invalidation::product_deleted(id).touches(QueryKey::Products));
        assert!(Invalidation::category_deleted().touches(QueryKey::Products));
        assert!(!Invalidation::category_saved().touches(QueryKey::Products));
    }
}
