//! Product and category commands.
//!
//! Writes go through the admin forms so the CLI rejects exactly what the
//! admin panel rejects, before anything is sent.

use frituur_admin::{
    CONFIRM_TITLE, Categories, CategoryForm, Deletable, FormEntity, FormFlow, PendingDeletion,
    ProductForm, Products,
};
use frituur_client::ApiError;
use frituur_core::{CategoryId, ProductId};
use frituur_storefront::filter_by_category;

use super::{CommandError, Context};
use crate::output;

pub async fn list_products(ctx: &Context<'_>, category: Option<i32>) -> Result<(), CommandError> {
    let products = ctx.cache.products(ctx.client).await?;
    output::products(&filter_by_category(&products, category.map(CategoryId::new)));
    Ok(())
}

pub async fn list_categories(ctx: &Context<'_>) -> Result<(), CommandError> {
    let categories = ctx.cache.categories(ctx.client).await?;
    output::categories(&categories);
    Ok(())
}

pub async fn add_product(
    ctx: &Context<'_>,
    fields: Vec<(&'static str, String)>,
) -> Result<(), CommandError> {
    let mut form = ProductForm::new();
    form.create()?;
    fill(&mut form, fields)?;

    let product = form
        .submit(ctx.client, async |inv| ctx.cache.apply(&inv).await)
        .await?;
    output::saved(Products::KIND, product.id, &product.name);
    Ok(())
}

/// Load the product, overwrite the given fields, save.
pub async fn edit_product(
    ctx: &Context<'_>,
    id: i32,
    fields: Vec<(&'static str, String)>,
) -> Result<(), CommandError> {
    let current = ctx.cache.product(ctx.client, ProductId::new(id)).await?;
    let mut form = ProductForm::new();
    form.edit(&current)?;
    fill(&mut form, fields)?;

    let product = form
        .submit(ctx.client, async |inv| ctx.cache.apply(&inv).await)
        .await?;
    output::saved(Products::KIND, product.id, &product.name);
    Ok(())
}

pub async fn delete_product(ctx: &Context<'_>, id: i32, yes: bool) -> Result<(), CommandError> {
    delete::<Products>(ctx, ProductId::new(id), yes).await
}

pub async fn add_category(ctx: &Context<'_>, name: String) -> Result<(), CommandError> {
    let mut form = CategoryForm::new();
    form.create()?;
    form.set_field("name", name)?;

    let category = form
        .submit(ctx.client, async |inv| ctx.cache.apply(&inv).await)
        .await?;
    output::saved(Categories::KIND, category.id, &category.name);
    Ok(())
}

pub async fn edit_category(ctx: &Context<'_>, id: i32, name: String) -> Result<(), CommandError> {
    let id = CategoryId::new(id);
    let current = ctx
        .cache
        .categories(ctx.client)
        .await?
        .into_iter()
        .find(|category| category.id == id)
        .ok_or_else(|| ApiError::Api {
            status: 404,
            message: format!("category {id} not found"),
        })?;

    let mut form = CategoryForm::new();
    form.edit(&current)?;
    form.set_field("name", name)?;

    let category = form
        .submit(ctx.client, async |inv| ctx.cache.apply(&inv).await)
        .await?;
    output::saved(Categories::KIND, category.id, &category.name);
    Ok(())
}

pub async fn delete_category(ctx: &Context<'_>, id: i32, yes: bool) -> Result<(), CommandError> {
    delete::<Categories>(ctx, CategoryId::new(id), yes).await
}

fn fill<E: FormEntity>(
    form: &mut FormFlow<E>,
    fields: Vec<(&'static str, String)>,
) -> Result<(), CommandError> {
    for (name, value) in fields {
        form.set_field(name, value)?;
    }
    Ok(())
}

async fn delete<E: Deletable>(ctx: &Context<'_>, id: E::Id, yes: bool) -> Result<(), CommandError> {
    let pending = PendingDeletion::<E>::request(id);

    if !yes && !output::confirm(CONFIRM_TITLE, &pending.warning())? {
        pending.cancel();
        return Err(CommandError::Aborted);
    }

    pending
        .confirm(ctx.client, async |inv| ctx.cache.apply(&inv).await)
        .await?;
    output::deleted(E::KIND, id);
    Ok(())
}
