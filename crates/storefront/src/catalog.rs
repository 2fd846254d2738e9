//! Catalog browsing.

use frituur_core::{CategoryId, Product};

/// Products in the selected category, in their original order.
///
/// With no category selected the whole list is returned.
#[must_use]
pub fn filter_by_category(products: &[Product], selected: Option<CategoryId>) -> Vec<&Product> {
    products
        .iter()
        .filter(|product| selected.is_none_or(|category| product.category_id == category))
        .collect()
}
