//! Category form.

use std::future::Future;
use std::sync::LazyLock;

use frituur_client::{ApiError, CatalogApi, Invalidation};
use frituur_core::validation::Field;
use frituur_core::{Category, CategoryDraft, CategoryId, FieldValues, Schema, ValidationErrors};
use regex::Regex;

use super::FormEntity;
use crate::confirm::Deletable;

static LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("Invalid regex"));

static CATEGORY_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new().field(
        Field::new("name")
            .required("Category name is required")
            .pattern(LETTERS.clone(), "Category name must only contain letters")
            .min_length(3, "Category name must be at least 3 characters long"),
    )
});

/// Marker for the category form.
#[derive(Debug, Clone, Copy)]
pub struct Categories;

impl FormEntity for Categories {
    type Id = CategoryId;
    type Draft = CategoryDraft;
    type Saved = Category;

    const KIND: &'static str = "category";

    fn schema() -> &'static Schema {
        &CATEGORY_SCHEMA
    }

    fn parse(values: &FieldValues) -> Result<CategoryDraft, ValidationErrors> {
        Ok(CategoryDraft {
            name: values.get("name").trim().to_string(),
        })
    }

    fn values_of(category: &Category) -> FieldValues {
        FieldValues::new().with("name", category.name.as_str())
    }

    fn id_of(category: &Category) -> CategoryId {
        category.id
    }

    fn create(
        api: &impl CatalogApi,
        draft: &CategoryDraft,
    ) -> impl Future<Output = Result<Category, ApiError>> + Send {
        api.create_category(draft)
    }

    fn update(
        api: &impl CatalogApi,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> impl Future<Output = Result<Category, ApiError>> + Send {
        api.update_category(id, draft)
    }

    fn created(_: &Category) -> Invalidation {
        Invalidation::category_saved()
    }

    fn updated(_: CategoryId) -> Invalidation {
        Invalidation::category_saved()
    }
}

impl Deletable for Categories {
    fn delete(
        api: &impl CatalogApi,
        id: CategoryId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        api.delete_category(id)
    }

    fn deleted(_: CategoryId) -> Invalidation {
        Invalidation::category_deleted()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn check(name: &str) -> Option<String> {
        Categories::schema()
            .validate(&FieldValues::new().with("name", name))
            .err()
            .and_then(|errors| errors.get("name").map(str::to_string))
    }

    #[test]
    fn test_category_name_rules() {
        assert_eq!(check("").as_deref(), Some("Category name is required"));
        assert_eq!(
            check("Snacks1").as_deref(),
            Some("Category name must only contain letters")
        );
        assert_eq!(
            check("Ab").as_deref(),
            Some("Category name must be at least 3 characters long")
        );
        assert_eq!(check("Hot Snacks"), None);
    }

    #[test]
    fn test_parse_trims_name() {
        let draft = Categories::parse(&FieldValues::new().with("name", "  Sauces ")).unwrap();
        assert_eq!(draft.name, "Sauces");
    }
}
