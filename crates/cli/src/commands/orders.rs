//! Order commands.

use frituur_client::{CatalogApi, QueryCache};
use frituur_core::{CustomerId, ProductId};
use frituur_storefront::OrderPage;

use super::{CommandError, Context};
use crate::output;

pub async fn list(ctx: &Context<'_>, customer: Option<i32>) -> Result<(), CommandError> {
    let orders = match customer {
        Some(id) => {
            ctx.cache
                .customer_orders(ctx.client, CustomerId::new(id))
                .await?
        }
        None => ctx.cache.orders(ctx.client).await?,
    };
    output::orders(&orders);
    Ok(())
}

/// Fill a cart with the given products and check out.
pub async fn place(ctx: &Context<'_>, customer: i32, products: &[i32]) -> Result<(), CommandError> {
    let mut page = fill_cart(ctx.cache, ctx.client, products).await?;
    output::cart(&page.cart().summary(), page.total());

    let order = page
        .checkout(ctx.client, CustomerId::new(customer), async |inv| {
            ctx.cache.apply(&inv).await;
        })
        .await?;
    output::placed(&order);
    Ok(())
}

/// Open an ordering page with the given products in its cart.
///
/// Unlike the ordering page itself, an unreachable catalog is an error here.
async fn fill_cart(
    cache: &QueryCache,
    api: &impl CatalogApi,
    products: &[i32],
) -> Result<OrderPage, CommandError> {
    let mut page = OrderPage::new(cache.products(api).await?);
    for &id in products {
        page.add_to_cart(ProductId::new(id))?;
    }
    Ok(page)
}
