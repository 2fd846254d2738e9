//! Pickup orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CustomerId, OrderId, ProductId};

/// An order as returned by the order service.
///
/// The client never changes an order after creating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub pickup: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_ids: Vec<ProductId>,
}

/// Body for `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer_id: CustomerId,
    pub pickup: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_ids: Vec<ProductId>,
}

impl OrderDraft {
    /// Start an order for pickup now.
    #[must_use]
    pub fn now(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            pickup: Utc::now(),
            product_ids: Vec::new(),
        }
    }

    /// Attach the ordered products, one entry per unit.
    #[must_use]
    pub fn with_products(mut self, product_ids: Vec<ProductId>) -> Self {
        self.product_ids = product_ids;
        self
    }
}
