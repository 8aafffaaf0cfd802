//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{CatalogStore, load_async};
use crate::config::StorefrontConfig;
use crate::middleware::SessionLocks;
use crate::services::{ContactSink, ContactSinkError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart is not here: it
/// belongs to each visitor's session and is restored per request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogStore,
    contact: ContactSink,
    session_locks: SessionLocks,
}

impl AppState {
    /// Create a new application state with an unloaded catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the contact webhook client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, ContactSinkError> {
        let contact = ContactSink::from_webhook(config.contact_webhook.as_ref())?;
        Ok(Self::with_parts(config, CatalogStore::new(), contact))
    }

    /// Create application state from already-built parts.
    #[must_use]
    pub fn with_parts(config: StorefrontConfig, catalog: CatalogStore, contact: ContactSink) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                contact,
                session_locks: SessionLocks::new(),
            }),
        }
    }

    /// Start loading the catalog in the background.
    pub fn start_catalog_loading(&self) {
        load_async(self.inner.catalog.clone(), self.inner.config.catalog.clone());
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    /// Get a reference to the contact sink.
    #[must_use]
    pub fn contact(&self) -> &ContactSink {
        &self.inner.contact
    }

    /// Get the per-session lock table.
    #[must_use]
    pub fn session_locks(&self) -> &SessionLocks {
        &self.inner.session_locks
    }
}
