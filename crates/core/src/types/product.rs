//! Products offered by the shop.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::price::Price;

/// A product as returned by the order/product service.
///
/// The storefront only ever reads products; they are created and updated
/// through the admin forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Price,
    /// Image file name, relative to the shop's product image directory.
    #[serde(default)]
    pub url: Option<String>,
    pub category_id: CategoryId,
}

impl Product {
    /// The request body that would recreate this product.
    #[must_use]
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            url: self.url.clone(),
            category_id: self.category_id,
        }
    }
}

/// Body for `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub url: Option<String>,
    pub category_id: CategoryId,
}

impl ProductDraft {
    /// Attach the server-assigned ID.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            url: self.url,
            category_id: self.category_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_format() {
        let json = r#"{"id":3,"name":"Fries","price":2.5,"url":"fries.jpg","categoryId":1}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.description, None);
        assert_eq!(product.price, Price::from_cents(250));
        assert_eq!(product.category_id, CategoryId::new(1));
    }

    #[test]
    fn test_draft_uses_camel_case() {
        let draft = ProductDraft {
            name: "Frikandel".to_string(),
            description: None,
            price: Price::from_cents(300),
            url: None,
            category_id: CategoryId::new(2),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["categoryId"], 2);
        assert!(value.get("id").is_none());
    }
}
