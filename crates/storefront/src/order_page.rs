//! The ordering page session.
//!
//! Owns the loaded product list, the selected category and the cart for one
//! visit. Nothing here outlives the session.

use frituur_client::{CatalogApi, Invalidation, OrderApi, QueryCache};
use frituur_core::{CategoryId, CustomerId, Order, OrderDraft, Price, Product, ProductId};
use tracing::{info, instrument, warn};

use crate::cart::Cart;
use crate::catalog::filter_by_category;
use crate::error::{CartError, CheckoutError};

/// State of one ordering session.
#[derive(Debug, Clone, Default)]
pub struct OrderPage {
    products: Vec<Product>,
    selected_category: Option<CategoryId>,
    cart: Cart,
}

impl OrderPage {
    /// A page over an already loaded product list.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            selected_category: None,
            cart: Cart::new(),
        }
    }

    /// Load the product list and open a page over it.
    ///
    /// This read is best-effort: if the backend cannot be reached the failure
    /// is logged and the page opens with no products.
    #[instrument(skip_all)]
    pub async fn load(cache: &QueryCache, api: &impl CatalogApi) -> Self {
        match cache.products(api).await {
            Ok(products) => Self::new(products),
            Err(e) => {
                warn!(error = %e, "Failed to load products, showing empty catalog");
                Self::default()
            }
        }
    }

    /// Every loaded product.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Select a category, or `None` for all products.
    pub const fn select_category(&mut self, category: Option<CategoryId>) {
        self.selected_category = category;
    }

    #[must_use]
    pub const fn selected_category(&self) -> Option<CategoryId> {
        self.selected_category
    }

    /// Products shown for the current category selection.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        filter_by_category(&self.products, self.selected_category)
    }

    /// Add one unit of a loaded product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownProduct` if the ID is not in the catalog.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<&Product, CartError> {
        let product = self
            .products
            .iter()
            .find(|product| product.id == id)
            .ok_or(CartError::UnknownProduct(id))?;
        self.cart.add(product.clone());
        Ok(product)
    }

    /// Remove every unit of a product from the cart.
    pub fn remove_from_cart(&mut self, id: ProductId) -> usize {
        self.cart.remove(id)
    }

    /// Take one unit of a product back out of the cart.
    ///
    /// Returns false if the product was not in the cart.
    pub fn remove_one_from_cart(&mut self, id: ProductId) -> bool {
        self.cart.remove_one(id)
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// Place a pickup order for the cart contents.
    ///
    /// The pickup time is the moment of submission. On success the cart is
    /// emptied and `on_success` receives the queries the new order made
    /// stale. On failure the cart is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` without contacting the backend if
    /// the cart is empty, or `CheckoutError::Api` if the order call fails.
    #[instrument(skip(self, api, on_success), fields(lines = self.cart.len()))]
    pub async fn checkout(
        &mut self,
        api: &impl OrderApi,
        customer_id: CustomerId,
        on_success: impl AsyncFnOnce(Invalidation),
    ) -> Result<Order, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let draft = OrderDraft::now(customer_id).with_products(self.cart.product_ids());
        let order = api.create_order(&draft).await?;

        info!(order_id = %order.id, total = %self.cart.total(), "Order placed");
        self.cart.clear();
        on_success(Invalidation::order_created(customer_id)).await;

        Ok(order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use chrono::Utc;
    use frituur_client::QueryKey;
    use frituur_client::memory::{Call, MemoryBackend};

    use super::*;

    fn product(id: i32, cents: i64, category: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: None,
            price: Price::from_cents(cents),
            url: Some(format!("{id}.jpg")),
            category_id: CategoryId::new(category),
        }
    }

    fn backend() -> MemoryBackend {
        MemoryBackend::new().with_products([
            product(1, 250, 1),
            product(2, 300, 2),
            product(3, 75, 1),
        ])
    }

    fn cache() -> QueryCache {
        QueryCache::with_ttl(100, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_load_and_browse_by_category() {
        let api = backend();
        let mut page = OrderPage::load(&cache(), &api).await;
        assert_eq!(page.visible_products().len(), 3);

        page.select_category(Some(CategoryId::new(1)));
        let ids: Vec<i32> = page
            .visible_products()
            .iter()
            .map(|p| p.id.as_i32())
            .collect();
        assert_eq!(ids, vec![1, 3]);

        page.select_category(None);
        assert_eq!(page.visible_products().len(), 3);
    }

    #[tokio::test]
    async fn test_load_failure_opens_empty_page() {
        let api = backend();
        api.fail_with(Some(503));

        let page = OrderPage::load(&cache(), &api).await;

        assert!(page.products().is_empty());
        assert_eq!(api.calls(), vec![Call::ListProducts]);
    }

    #[test]
    fn test_add_unknown_product_is_rejected() {
        let mut page = OrderPage::new(vec![product(1, 250, 1)]);
        assert_eq!(
            page.add_to_cart(ProductId::new(42)).unwrap_err(),
            CartError::UnknownProduct(ProductId::new(42))
        );
        assert!(page.cart().is_empty());
    }

    #[test]
    fn test_remove_from_cart_drops_all_units() {
        let mut page = OrderPage::new(vec![product(1, 250, 1), product(2, 300, 2)]);
        page.add_to_cart(ProductId::new(1)).unwrap();
        page.add_to_cart(ProductId::new(1)).unwrap();
        page.add_to_cart(ProductId::new(2)).unwrap();
        assert_eq!(page.total(), Price::from_cents(800));

        assert_eq!(page.remove_from_cart(ProductId::new(1)), 2);
        assert_eq!(page.total(), Price::from_cents(300));
    }

    #[test]
    fn test_remove_one_from_cart_keeps_other_units() {
        let mut page = OrderPage::new(vec![product(1, 250, 1)]);
        page.add_to_cart(ProductId::new(1)).unwrap();
        page.add_to_cart(ProductId::new(1)).unwrap();

        assert!(page.remove_one_from_cart(ProductId::new(1)));
        assert_eq!(page.cart().quantity_of(ProductId::new(1)), 1);
        assert_eq!(page.total(), Price::from_cents(250));
        assert!(!page.remove_one_from_cart(ProductId::new(2)));
    }

    #[tokio::test]
    async fn test_checkout_places_order_and_clears_cart() {
        let api = backend();
        let mut page = OrderPage::load(&cache(), &api).await;
        page.add_to_cart(ProductId::new(1)).unwrap();
        page.add_to_cart(ProductId::new(3)).unwrap();
        let customer = CustomerId::new(3);
        let notified = RefCell::new(Vec::new());

        let before = Utc::now();
        let order = page
            .checkout(&api, customer, async |inv| notified.borrow_mut().push(inv))
            .await
            .unwrap();
        let after = Utc::now();

        assert_eq!(order.customer_id, customer);
        assert!(order.id.as_i32() > 100);
        assert!(order.pickup >= before && order.pickup <= after);
        assert_eq!(order.product_ids, vec![ProductId::new(1), ProductId::new(3)]);
        assert!(page.cart().is_empty());

        let notified = notified.into_inner();
        assert_eq!(notified.len(), 1);
        assert!(notified[0].touches(QueryKey::CustomerOrders(customer)));
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_makes_no_call() {
        let api = backend();
        let mut page = OrderPage::new(Vec::new());

        let result = page
            .checkout(&api, CustomerId::new(3), async |_| {})
            .await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_checkout_keeps_cart() {
        let api = backend();
        let mut page = OrderPage::load(&cache(), &api).await;
        page.add_to_cart(ProductId::new(2)).unwrap();
        api.fail_with(Some(500));
        let mut notified = false;

        let result = page
            .checkout(&api, CustomerId::new(3), async |_| notified = true)
            .await;

        assert!(matches!(result, Err(CheckoutError::Api(_))));
        assert_eq!(page.cart().len(), 1);
        assert!(!notified);
    }
}
