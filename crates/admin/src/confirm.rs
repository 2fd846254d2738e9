//! Confirmation before destructive actions.
//!
//! A delete is a two-step protocol: [`PendingDeletion::request`] opens the
//! confirmation and only [`PendingDeletion::confirm`] sends anything. There
//! is no other path to a delete call in this crate.

use std::future::Future;
use std::marker::PhantomData;

use frituur_client::{ApiError, CatalogApi, Invalidation};
use tracing::{debug, info, instrument, warn};

use crate::forms::FormEntity;

/// Title of the confirmation dialog.
pub const CONFIRM_TITLE: &str = "Are you absolutely sure?";

/// An entity kind that can be deleted.
pub trait Deletable: FormEntity {
    fn delete(
        api: &impl CatalogApi,
        id: Self::Id,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Queries made stale by a delete.
    fn deleted(id: Self::Id) -> Invalidation;
}

/// A delete waiting for explicit confirmation.
#[derive(Debug)]
#[must_use = "a pending deletion does nothing until confirmed or cancelled"]
pub struct PendingDeletion<E: Deletable> {
    id: E::Id,
    kind: PhantomData<E>,
}

impl<E: Deletable> PendingDeletion<E> {
    /// Ask to delete `id`. Nothing is sent yet.
    pub fn request(id: E::Id) -> Self {
        debug!(kind = E::KIND, %id, "Delete requested");
        Self {
            id,
            kind: PhantomData,
        }
    }

    #[must_use]
    pub const fn id(&self) -> E::Id {
        self.id
    }

    /// Body of the confirmation dialog.
    #[must_use]
    pub fn warning(&self) -> String {
        format!(
            "This action cannot be undone. This will permanently delete {} {} and remove the data from the server.",
            E::KIND,
            self.id
        )
    }

    /// Dismiss the dialog without deleting.
    pub fn cancel(self) {
        debug!(kind = E::KIND, id = %self.id, "Delete cancelled");
    }

    /// Send the delete.
    ///
    /// Exactly one delete call is made. `on_success` runs once with the
    /// stale queries if the backend accepted it.
    ///
    /// # Errors
    ///
    /// Returns the backend error; `on_success` is not called.
    #[instrument(skip_all, fields(kind = E::KIND, id = %self.id))]
    pub async fn confirm(
        self,
        api: &impl CatalogApi,
        on_success: impl AsyncFnOnce(Invalidation),
    ) -> Result<(), ApiError> {
        match E::delete(api, self.id).await {
            Ok(()) => {
                info!("Deleted {}", E::KIND);
                on_success(E::deleted(self.id)).await;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to delete {}", E::KIND);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use frituur_client::QueryKey;
    use frituur_client::memory::{Call, MemoryBackend};
    use frituur_core::{Category, CategoryId, Price, Product, ProductId};

    use super::*;
    use crate::forms::{Categories, Products};

    fn backend() -> MemoryBackend {
        MemoryBackend::new()
            .with_products([Product {
                id: ProductId::new(7),
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

    #[tokio::test]
    async fn test_confirmed_product_delete() {
        let api = backend();
        let notified = RefCell::new(Vec::new());

        PendingDeletion::<Products>::request(ProductId::new(7))
            .confirm(&api, async |inv| notified.borrow_mut().push(inv))
            .await
            .unwrap();

        assert_eq!(api.calls(), vec![Call::DeleteProduct(ProductId::new(7))]);
        assert!(api.products().is_empty());
        let notified = notified.into_inner();
        assert_eq!(notified.len(), 1);
        assert!(notified[0].touches(QueryKey::Products));
    }

    #[test]
    fn test_request_and_cancel_send_nothing() {
        let api = backend();
        let pending = PendingDeletion::<Products>::request(ProductId::new(7));
        assert_eq!(pending.id(), ProductId::new(7));
        assert!(pending.warning().contains("permanently delete product 7"));
        pending.cancel();
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_skips_notification() {
        let api = backend();
        api.fail_with(Some(500));
        let mut notified = false;

        let result = PendingDeletion::<Categories>::request(CategoryId::new(1))
            .confirm(&api, async |_| notified = true)
            .await;

        assert_eq!(result.unwrap_err().status(), Some(500));
        assert_eq!(api.calls(), vec![Call::DeleteCategory(CategoryId::new(1))]);
        assert!(!notified);
    }

    #[tokio::test]
    async fn test_category_delete_invalidates_products() {
        let api = backend();
        let notified = RefCell::new(Vec::new());

        PendingDeletion::<Categories>::request(CategoryId::new(1))
            .confirm(&api, async |inv| notified.borrow_mut().push(inv))
            .await
            .unwrap();

        assert_eq!(notified.into_inner(), vec![Invalidation::category_deleted()]);
    }
}
