//! Catalog loader.
//!
//! Reads the catalog document once at startup. Any failure is logged and
//! replaced by the embedded fallback catalog, so the shop always has
//! something to show. There is no retry and no timeout.

use thiserror::Error;
use tienda_core::{Catalog, CatalogError};
use tracing::{info, instrument, warn};

use super::CatalogStore;
use crate::config::CatalogSource;

/// Why the catalog document could not be used.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to fetch catalog: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Parse(#[from] CatalogError),
}

/// Spawn a background task that loads the catalog into `store`.
///
/// Until the task finishes, `CatalogStore::snapshot()` is empty.
pub fn load_async(store: CatalogStore, source: CatalogSource) {
    info!(%source, "Spawning background catalog load task");
    tokio::spawn(async move {
        let catalog = load_or_fallback(&source).await;
        let products = catalog.len();
        store.set_ready(catalog);
        info!(products, "Catalog is now ready and serving requests");
    });
}

/// Load the catalog, substituting the fallback set on any failure.
pub async fn load_or_fallback(source: &CatalogSource) -> Catalog {
    match fetch_catalog(source).await {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(%source, error = %e, "Failed to load catalog, using fallback products");
            Catalog::fallback()
        }
    }
}

/// Read and parse the catalog document.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the document cannot be read, the server
/// answers with a non-success status, or the body is not a product list.
#[instrument(skip_all, fields(%source))]
pub async fn fetch_catalog(source: &CatalogSource) -> Result<Catalog, CatalogLoadError> {
    let document = match source {
        CatalogSource::Path(path) => tokio::fs::read(path).await?,
        CatalogSource::Url(url) => reqwest::get(url.clone())
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec(),
    };

    let catalog = Catalog::from_json(&document)?;
    info!(products = catalog.len(), "Catalog document parsed");
    Ok(catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "tienda-catalog-{}-{name}.json",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_loads_catalog_from_file() {
        let path = temp_file(
            "valid",
            r#"[{"id": 5, "name": "Lámpara", "category": "hogar", "price": 35.0,
                 "description": "LED", "stock": 2}]"#,
        );

        let catalog = load_or_fallback(&CatalogSource::Path(path.clone())).await;
        std::fs::remove_file(path).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products().first().unwrap().name, "Lámpara");
    }

    #[tokio::test]
    async fn test_missing_file_falls_back() {
        let source = CatalogSource::Path(PathBuf::from("/nonexistent/tienda/products.json"));

        assert!(matches!(
            fetch_catalog(&source).await,
            Err(CatalogLoadError::Io(_))
        ));
        assert_eq!(load_or_fallback(&source).await, Catalog::fallback());
    }

    #[tokio::test]
    async fn test_malformed_document_falls_back() {
        let path = temp_file("malformed", r#"{"products": "nope"}"#);
        let source = CatalogSource::Path(path.clone());

        let result = fetch_catalog(&source).await;
        let catalog = load_or_fallback(&source).await;
        std::fs::remove_file(path).unwrap();

        assert!(matches!(result, Err(CatalogLoadError::Parse(_))));
        assert_eq!(catalog, Catalog::fallback());
    }

    #[tokio::test]
    async fn test_load_async_populates_store() {
        let store = CatalogStore::new();
        load_async(
            store.clone(),
            CatalogSource::Path(PathBuf::from("/nonexistent/tienda/products.json")),
        );

        for _ in 0..100 {
            if store.is_ready() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(store.snapshot().len(), 3);
    }
}
