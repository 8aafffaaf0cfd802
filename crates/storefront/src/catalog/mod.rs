//! Process-wide catalog store.
//!
//! The app starts immediately with an empty catalog. A background task loads
//! the real one (or the embedded fallback) and swaps it in once. Until then
//! every reader sees an empty product grid.

mod loader;

use std::sync::{Arc, RwLock};

use tienda_core::Catalog;

pub use loader::{CatalogLoadError, fetch_catalog, load_async, load_or_fallback};

/// Shared handle to the catalog.
///
/// Cheap to clone. Readers get an `Arc<Catalog>` snapshot and never hold the
/// lock while rendering.
#[derive(Clone, Default)]
pub struct CatalogStore {
    inner: Arc<RwLock<Option<Arc<Catalog>>>>,
}

impl CatalogStore {
    /// Create a store whose catalog has not been loaded yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that is already loaded.
    #[must_use]
    pub fn ready(catalog: Catalog) -> Self {
        let store = Self::new();
        store.set_ready(catalog);
        store
    }

    /// Check whether the catalog has been loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner
            .read()
            .map_or_else(|poisoned| poisoned.into_inner().is_some(), |guard| guard.is_some())
    }

    /// Current catalog, or an empty one while loading is pending.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Catalog> {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.clone().unwrap_or_default()
    }

    /// Install the loaded catalog. Called once by the loader task.
    pub(crate) fn set_ready(&self, catalog: Catalog) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(Arc::new(catalog));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_store_is_empty() {
        let store = CatalogStore::new();
        assert!(!store.is_ready());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_ready_store_serves_catalog() {
        let store = CatalogStore::ready(Catalog::fallback());
        assert!(store.is_ready());
        assert_eq!(store.snapshot().len(), 3);
    }

    #[test]
    fn test_clones_share_state() {
        let store = CatalogStore::new();
        let reader = store.clone();
        store.set_ready(Catalog::fallback());
        assert!(reader.is_ready());
    }
}
