//! Products and the read-only catalog.
//!
//! A [`Catalog`] is built once per process, either from a JSON document or
//! from the embedded [`Catalog::fallback`] set, and is never mutated after
//! that. Lookups are linear; the catalog is small and its order matters more
//! than lookup speed.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// Image shown when a product has no `image`.
pub const PLACEHOLDER_IMAGE: &str = "images/productos/placeholder.jpg";

/// Glyph shown when a product has no `emoji` or its image fails to load.
pub const PLACEHOLDER_EMOJI: &str = "📦";

/// Errors raised while reading a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not a JSON array of products.
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A suspicious catalog entry reported by [`Catalog::audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// More than one product shares this id; only the first is reachable.
    DuplicateId(ProductId),
    /// The product's price is below zero.
    NegativePrice(ProductId),
    /// The product has an empty name.
    BlankName(ProductId),
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate product id {id}"),
            Self::NegativePrice(id) => write!(f, "product {id} has a negative price"),
            Self::BlankName(id) => write!(f, "product {id} has no name"),
        }
    }
}

/// A purchasable product.
///
/// Only `id`, `name` and `price` are required in the document; `image` and
/// `emoji` stay optional and are defaulted at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    /// Advisory stock level. Never checked against cart quantities.
    #[serde(default)]
    pub stock: u32,
}

impl Product {
    /// Image URI to render, falling back to the placeholder.
    #[must_use]
    pub fn image_or_placeholder(&self) -> &str {
        self.image
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Glyph to render when the image is unavailable.
    #[must_use]
    pub fn emoji_or_placeholder(&self) -> &str {
        self.emoji
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(PLACEHOLDER_EMOJI)
    }
}

/// The ordered, read-only list of products for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from products in display order.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a catalog document: a JSON array of product objects.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the document is not valid JSON or
    /// any entry is missing a required field.
    pub fn from_json(document: &[u8]) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_slice(document)?;
        Ok(Self { products })
    }

    /// The embedded sample catalog used when the real one cannot be loaded.
    #[must_use]
    pub fn fallback() -> Self {
        let entry = |id: i64,
                     name: &str,
                     price: &str,
                     description: &str,
                     image: &str,
                     emoji: &str,
                     stock: u32| Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: "electrónica".to_string(),
            price: Price::new(Decimal::from_str(price).unwrap_or_default()),
            description: description.to_string(),
            image: Some(format!("images/productos/{image}")),
            emoji: Some(emoji.to_string()),
            stock,
        };

        Self::new(vec![
            entry(
                1,
                "Laptop Gaming",
                "1299.99",
                "Potente laptop para gaming y trabajo",
                "laptop-gaming.jpg",
                "💻",
                15,
            ),
            entry(
                2,
                "Smartphone Pro",
                "899.99",
                "Última generación con 5G",
                "smartphone.jpg",
                "📱",
                25,
            ),
            entry(
                3,
                "Auriculares Bluetooth",
                "149.99",
                "Cancelación de ruido activa",
                "auriculares.jpg",
                "🎧",
                40,
            ),
        ])
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            let category = product.category.as_str();
            if !category.is_empty() && !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Entries that parse but would misbehave in the shop, in catalog order.
    #[must_use]
    pub fn audit(&self) -> Vec<CatalogIssue> {
        let mut seen = BTreeSet::new();
        let mut issues = Vec::new();
        for product in &self.products {
            if !seen.insert(product.id) {
                issues.push(CatalogIssue::DuplicateId(product.id));
            }
            if product.price.is_negative() {
                issues.push(CatalogIssue::NegativePrice(product.id));
            }
            if product.name.trim().is_empty() {
                issues.push(CatalogIssue::BlankName(product.id));
            }
        }
        issues
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_clean_fallback() {
        assert!(Catalog::fallback().audit().is_empty());
    }

    #[test]
    fn test_audit_reports_problems() {
        let catalog = Catalog::from_json(
            br#"[
                {"id": 1, "name": "Taza", "price": 4},
                {"id": 1, "name": "Plato", "price": -2},
                {"id": 2, "name": "  ", "price": 1}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            catalog.audit(),
            vec![
                CatalogIssue::DuplicateId(ProductId::new(1)),
                CatalogIssue::NegativePrice(ProductId::new(1)),
                CatalogIssue::BlankName(ProductId::new(2)),
            ]
        );
        assert_eq!(
            CatalogIssue::DuplicateId(ProductId::new(1)).to_string(),
            "duplicate product id 1"
        );
    }

    #[test]
    fn test_fallback_has_three_products_in_order() {
        let catalog = Catalog::fallback();
        let ids: Vec<i64> = catalog.products().iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog.products()[1].name, "Smartphone Pro");
        assert_eq!(catalog.products()[1].price.display(), "$899.99");
    }

    #[test]
    fn test_from_json_full_document() {
        let doc = r#"[
            {"id": 10, "name": "Camiseta", "category": "ropa", "price": 19.5,
             "description": "Algodón", "image": "img/c.jpg", "emoji": "👕", "stock": 3}
        ]"#;
        let catalog = Catalog::from_json(doc.as_bytes()).unwrap();
        let product = catalog.find(ProductId::new(10)).unwrap();
        assert_eq!(product.category, "ropa");
        assert_eq!(product.description, "Algodón");
        assert_eq!(product.emoji_or_placeholder(), "👕");
        assert_eq!(product.price.display(), "$19.50");
        assert_eq!(product.stock, 3);
    }

    #[test]
    fn test_from_json_optional_fields_default() {
        let doc = br#"[{"id": 1, "name": "Taza", "price": 4}]"#;
        let catalog = Catalog::from_json(doc).unwrap();
        let product = &catalog.products()[0];
        assert_eq!(product.image, None);
        assert_eq!(product.image_or_placeholder(), PLACEHOLDER_IMAGE);
        assert_eq!(product.emoji_or_placeholder(), PLACEHOLDER_EMOJI);
        assert_eq!(product.stock, 0);
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        assert!(Catalog::from_json(br#"{"products": []}"#).is_err());
        assert!(Catalog::from_json(b"not json").is_err());
    }

    #[test]
    fn test_from_json_rejects_missing_price() {
        assert!(Catalog::from_json(br#"[{"id": 1, "name": "Taza"}]"#).is_err());
    }

    #[test]
    fn test_find_missing_returns_none() {
        assert!(Catalog::fallback().find(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_categories_distinct_in_order() {
        let doc = br#"[
            {"id": 1, "name": "A", "category": "ropa", "price": 1},
            {"id": 2, "name": "B", "category": "hogar", "price": 1},
            {"id": 3, "name": "C", "category": "ropa", "price": 1}
        ]"#;
        let catalog = Catalog::from_json(doc).unwrap();
        assert_eq!(catalog.categories(), vec!["ropa", "hogar"]);
    }
}
