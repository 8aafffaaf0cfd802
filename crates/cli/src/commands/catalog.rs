//! Catalog commands.
//!
//! Both commands read the same JSON document the storefront loads, so a file
//! that passes `validate` is one the storefront will serve without falling
//! back to the sample products.

use std::io::{self, Write};
use std::path::Path;

use tienda_core::{Catalog, CategoryFilter, Product, visible};
use tracing::{info, warn};

use super::CliError;

/// Read and parse a catalog document.
async fn load(path: &Path) -> Result<Catalog, CliError> {
    let document = tokio::fs::read(path).await.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Catalog::from_json(&document)?)
}

/// Validate a catalog document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the audit
/// finds any problem.
pub async fn validate(path: &Path) -> Result<(), CliError> {
    let catalog = load(path).await?;

    info!(
        products = catalog.len(),
        categories = ?catalog.categories(),
        "Catalog parsed"
    );

    let issues = catalog.audit();
    for issue in &issues {
        warn!("{issue}");
    }

    if issues.is_empty() {
        info!("Catalog is valid");
        Ok(())
    } else {
        Err(CliError::Invalid(issues.len()))
    }
}

/// Print the products visible for a category and query.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or stdout is closed.
pub async fn search(path: &Path, category: &str, query: &str) -> Result<(), CliError> {
    let catalog = load(path).await?;
    let filter = CategoryFilter::parse(category);
    let products = visible(catalog.products(), &filter, query);

    let mut out = io::stdout().lock();
    write_rows(&mut out, &products)?;

    info!(
        shown = products.len(),
        total = catalog.len(),
        category = %filter,
        "Search complete"
    );
    Ok(())
}

fn write_rows(out: &mut impl Write, products: &[&Product]) -> io::Result<()> {
    for product in products {
        writeln!(
            out,
            "{:>4}  {:<12}  {:>10}  {}",
            product.id,
            product.category,
            product.price.display(),
            product.name
        )?;
    }
    Ok(())
}
