//! Browsing and checkout through the real client.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::http::StatusCode;
use chrono::Utc;
use frituur_client::QueryCache;
use frituur_core::{CategoryId, CustomerId, Price, Product, ProductId};
use frituur_integration_tests::MockBackend;
use frituur_storefront::{CheckoutError, OrderPage};

fn product(id: i32, cents: i64, category: i32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        description: None,
        price: Price::from_cents(cents),
        url: None,
        category_id: CategoryId::new(category),
    }
}

async fn shop() -> MockBackend {
    MockBackend::start()
        .await
        .with_product(product(1, 250, 1))
        .with_product(product(2, 300, 2))
        .with_product(product(3, 75, 1))
}

fn cache() -> QueryCache {
    QueryCache::with_ttl(100, Duration::from_secs(60))
}

#[tokio::test]
async fn test_checkout_for_customer_three() {
    let mock = shop().await;
    let client = mock.client();
    let cache = cache();

    let mut page = OrderPage::load(&cache, &client).await;
    page.select_category(Some(CategoryId::new(1)));
    assert_eq!(page.visible_products().len(), 2);
    page.add_to_cart(ProductId::new(1)).unwrap();
    page.add_to_cart(ProductId::new(3)).unwrap();
    assert_eq!(page.total(), Price::from_cents(325));

    let before = Utc::now();
    let order = page
        .checkout(&client, CustomerId::new(3), async |inv| {
            cache.apply(&inv).await;
        })
        .await
        .unwrap();

    assert!(order.id.as_i32() > 100);
    assert_eq!(order.customer_id, CustomerId::new(3));
    assert!((order.pickup - before).num_seconds().abs() <= 5);
    assert!(page.cart().is_empty());
    assert_eq!(mock.orders(), vec![order]);

    let post = mock
        .requests()
        .into_iter()
        .find(|r| r.method == "POST")
        .unwrap();
    assert_eq!(post.path, "/orders");
}

#[tokio::test]
async fn test_product_list_is_fetched_once_per_cache_lifetime() {
    let mock = shop().await;
    let client = mock.client();
    let cache = cache();

    OrderPage::load(&cache, &client).await;
    OrderPage::load(&cache, &client).await;

    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_unreachable_catalog_opens_empty_page() {
    let mock = shop().await;
    mock.fail_with(Some(StatusCode::SERVICE_UNAVAILABLE));

    let page = OrderPage::load(&cache(), &mock.client()).await;

    assert!(page.products().is_empty());
}

#[tokio::test]
async fn test_failed_checkout_keeps_cart() {
    let mock = shop().await;
    let client = mock.client();
    let mut page = OrderPage::load(&cache(), &client).await;
    page.add_to_cart(ProductId::new(2)).unwrap();
    mock.fail_with(Some(StatusCode::BAD_GATEWAY));

    let err = page
        .checkout(&client, CustomerId::new(3), async |_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::Api(ref e) if e.status() == Some(502)));
    assert_eq!(page.cart().len(), 1);
    assert!(mock.orders().is_empty());
}
