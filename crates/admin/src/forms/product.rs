//! Product form.

use std::future::Future;
use std::sync::LazyLock;

use frituur_client::{ApiError, CatalogApi, Invalidation};
use frituur_core::validation::Field;
use frituur_core::{
    CategoryId, FieldValues, Price, Product, ProductDraft, ProductId, Schema, ValidationErrors,
};
use rust_decimal::Decimal;

use super::FormEntity;
use crate::confirm::Deletable;

static PRODUCT_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(
            Field::new("name")
                .required("Product name is required")
                .min_length(3, "Product name must be at least 3 characters long"),
        )
        .field(
            Field::new("description").min_length(3, "Description must be at least 3 characters long"),
        )
        .field(
            Field::new("price")
                .required("Price is required")
                .numeric("Price must be a number")
                .min_value(Decimal::new(5, 1), "Price must be at least 0.5"),
        )
        .field(Field::new("url"))
        .field(
            Field::new("categoryId")
                .required("Category ID is required")
                .numeric("Category ID must be a number")
                .min_value(Decimal::ZERO, "Category ID must be at least 0"),
        )
});

/// Marker for the product form.
#[derive(Debug, Clone, Copy)]
pub struct Products;

impl FormEntity for Products {
    type Id = ProductId;
    type Draft = ProductDraft;
    type Saved = Product;

    const KIND: &'static str = "product";

    fn schema() -> &'static Schema {
        &PRODUCT_SCHEMA
    }

    fn parse(values: &FieldValues) -> Result<ProductDraft, ValidationErrors> {
        let price = values
            .non_empty("price")
            .ok_or_else(|| ValidationErrors::single("price", "Price is required"))?;
        let price = Price::parse(price)
            .map_err(|_| ValidationErrors::single("price", "Price must be a number"))?;

        // The schema accepts any number; IDs must be whole.
        let category_id = values
            .non_empty("categoryId")
            .ok_or_else(|| ValidationErrors::single("categoryId", "Category ID is required"))?;
        let category_id: CategoryId = category_id.parse().map_err(|_| {
            ValidationErrors::single("categoryId", "Category ID must be a whole number")
        })?;

        Ok(ProductDraft {
            name: values.get("name").trim().to_string(),
            description: values.non_empty("description").map(str::to_string),
            price,
            url: values.non_empty("url").map(str::to_string),
            category_id,
        })
    }

    fn values_of(product: &Product) -> FieldValues {
        FieldValues::new()
            .with("name", product.name.as_str())
            .with("description", product.description.clone().unwrap_or_default())
            .with("price", product.price.amount().normalize().to_string())
            .with("url", product.url.clone().unwrap_or_default())
            .with("categoryId", product.category_id.to_string())
    }

    fn id_of(product: &Product) -> ProductId {
        product.id
    }

    fn create(
        api: &impl CatalogApi,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send {
        api.create_product(draft)
    }

    fn update(
        api: &impl CatalogApi,
        id: ProductId,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send {
        api.update_product(id, draft)
    }

    fn created(_: &Product) -> Invalidation {
        Invalidation::product_created()
    }

    fn updated(id: ProductId) -> Invalidation {
        Invalidation::product_updated(id)
    }
}

impl Deletable for Products {
    fn delete(
        api: &impl CatalogApi,
        id: ProductId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        api.delete_product(id)
    }

    fn deleted(id: ProductId) -> Invalidation {
        Invalidation::product_deleted(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid() -> FieldValues {
        FieldValues::new()
            .with("name", "Fries")
            .with("description", "Crispy")
            .with("price", "2.50")
            .with("url", "fries.jpg")
            .with("categoryId", "1")
    }

    #[test]
    fn test_valid_input_parses_to_draft() {
        let values = valid();
        assert!(Products::schema().validate(&values).is_ok());

        let draft = Products::parse(&values).unwrap();
        assert_eq!(draft.name, "Fries");
        assert_eq!(draft.price, Price::from_cents(250));
        assert_eq!(draft.category_id, CategoryId::new(1));
        assert_eq!(draft.url.as_deref(), Some("fries.jpg"));
    }

    #[test]
    fn test_price_below_minimum_is_rejected() {
        let errors = Products::schema()
            .validate(&valid().with("price", "0.25"))
            .unwrap_err();
        assert_eq!(errors.get("price"), Some("Price must be at least 0.5"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_each_field_reports_its_first_failure() {
        let values = FieldValues::new()
            .with("name", "Fr")
            .with("price", "abc")
            .with("description", "");
        let errors = Products::schema().validate(&values).unwrap_err();

        assert_eq!(
            errors.get("name"),
            Some("Product name must be at least 3 characters long")
        );
        assert_eq!(errors.get("price"), Some("Price must be a number"));
        assert_eq!(errors.get("categoryId"), Some("Category ID is required"));
        assert_eq!(errors.get("description"), None);
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let draft = Products::parse(&valid().with("description", " ").with("url", "")).unwrap();
        assert_eq!(draft.description, None);
        assert_eq!(draft.url, None);
    }

    #[test]
    fn test_fractional_category_id_is_rejected() {
        let values = valid().with("categoryId", "1.5");
        assert!(Products::schema().validate(&values).is_ok());
        let errors = Products::parse(&values).unwrap_err();
        assert_eq!(
            errors.get("categoryId"),
            Some("Category ID must be a whole number")
        );
    }

    #[test]
    fn test_values_of_round_trips_through_parse() {
        let product = Product {
            id: ProductId::new(7),
            name: "Frikandel".to_string(),
            description: None,
            price: Price::from_cents(300),
            url: Some("frikandel.jpg".to_string()),
            category_id: CategoryId::new(2),
        };

        let values = Products::values_of(&product);
        assert_eq!(values.get("price"), "3");
        assert_eq!(values.get("description"), "");
        assert_eq!(Products::parse(&values).unwrap(), product.to_draft());
    }
}
