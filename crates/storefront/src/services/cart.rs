//! Session-backed cart store.
//!
//! The cart is kept under a single session key. It is restored at the start
//! of every request and written through to the session store as soon as an
//! action changes it, so the stored snapshot never lags the in-memory cart.

use thiserror::Error;
use tienda_core::{Cart, CartAction, Catalog, Outcome, dispatch};
use tower_sessions::Session;
use tracing::{debug, instrument, warn};

use crate::models::session_keys;

/// Failure to write the cart back to the session store.
#[derive(Debug, Error)]
#[error("failed to persist cart: {0}")]
pub struct CartStoreError(#[from] tower_sessions::session::Error);

/// A cart bound to the session it came from.
pub struct CartStore {
    session: Session,
    cart: Cart,
}

impl CartStore {
    /// Restore the cart from the session.
    ///
    /// A missing entry, an unreadable session or a snapshot that does not
    /// decode all yield an empty cart.
    #[instrument(skip_all)]
    pub async fn restore(session: Session) -> Self {
        let cart = match session.get::<serde_json::Value>(session_keys::CART).await {
            Ok(Some(value)) => Cart::from_snapshot(value).unwrap_or_else(|e| {
                warn!(error = %e, "Stored cart is corrupt, starting with an empty cart");
                Cart::new()
            }),
            Ok(None) => {
                debug!("No stored cart");
                Cart::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, starting with an empty cart");
                Cart::new()
            }
        };

        Self { session, cart }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Apply an action and persist the cart if it changed.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError` if the session store rejects the write.
    #[instrument(skip(self, catalog))]
    pub async fn apply(
        &mut self,
        catalog: &Catalog,
        action: CartAction,
    ) -> Result<Outcome, CartStoreError> {
        let outcome = dispatch(&mut self.cart, catalog, action);
        if outcome.changed {
            self.persist().await?;
        }
        Ok(outcome)
    }

    async fn persist(&self) -> Result<(), CartStoreError> {
        self.session.insert(session_keys::CART, &self.cart).await?;
        self.session.save().await?;
        debug!(
            lines = self.cart.items().len(),
            items = self.cart.totals().item_count,
            "Cart persisted"
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use tienda_core::ProductId;
    use tower_sessions::MemoryStore;

    use super::*;

    fn session(store: &Arc<MemoryStore>) -> Session {
        Session::new(None, store.clone(), None)
    }

    #[tokio::test]
    async fn test_restore_empty_session() {
        let store = Arc::new(MemoryStore::default());
        let cart = CartStore::restore(session(&store)).await;
        assert!(cart.cart().is_empty());
    }

    #[tokio::test]
    async fn test_apply_persists_and_restores() {
        let store = Arc::new(MemoryStore::default());
        let catalog = Catalog::fallback();
        let session = session(&store);

        let mut cart = CartStore::restore(session.clone()).await;
        cart.apply(&catalog, CartAction::Add(ProductId::new(3)))
            .await
            .unwrap();
        cart.apply(&catalog, CartAction::Add(ProductId::new(3)))
            .await
            .unwrap();

        let id = session.id().unwrap();
        let reloaded = CartStore::restore(Session::new(Some(id), store.clone(), None)).await;
        assert_eq!(reloaded.cart(), cart.cart());
        assert_eq!(reloaded.cart().items()[0].quantity.get(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_restores_empty() {
        let store = Arc::new(MemoryStore::default());
        let session = session(&store);
        session
            .insert(session_keys::CART, serde_json::json!({"not": "a cart"}))
            .await
            .unwrap();

        let cart = CartStore::restore(session).await;
        assert!(cart.cart().is_empty());
    }

    #[tokio::test]
    async fn test_unchanged_cart_is_not_written() {
        let store = Arc::new(MemoryStore::default());
        let session = session(&store);

        let mut cart = CartStore::restore(session.clone()).await;
        let outcome = cart
            .apply(&Catalog::fallback(), CartAction::Remove(ProductId::new(1)))
            .await
            .unwrap();

        assert!(!outcome.changed);
        assert!(session.id().is_none());
    }
}
