//! Category and text filtering of the catalog.

use core::fmt;

use serde::{Deserialize, Deserializer};

use crate::catalog::Product;

/// Category selection for the product grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// Exactly one category tag.
    Only(String),
}

impl CategoryFilter {
    /// Parse a `data-category` value. `all`, `todos` and blank select everything.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") || value.eq_ignore_ascii_case("todos")
        {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    /// Whether a product passes the category half of the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == *category,
        }
    }

    /// The value used in `data-category` attributes and query strings.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(category) => category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Products visible under a category and search query, in catalog order.
///
/// The query matches case-insensitively as a substring of the name or the
/// description. An empty query matches everything.
#[must_use]
pub fn visible<'a>(
    products: &'a [Product],
    category: &CategoryFilter,
    query: &str,
) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| category.matches(p))
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn catalog() -> Catalog {
        Catalog::from_json(
            br#"[
                {"id": 1, "name": "Laptop Gaming", "category": "electronics",
                 "price": 1299.99, "description": "Powerful machine"},
                {"id": 2, "name": "Smartphone Pro", "category": "electronics",
                 "price": 899.99, "description": "5G"},
                {"id": 3, "name": "Sudadera", "category": "clothing",
                 "price": 39.0, "description": "Professional fit"},
                {"id": 4, "name": "Tablet", "category": "electronics",
                 "price": 299.0, "description": "PROductive on the go"}
            ]"#,
        )
        .unwrap()
    }

    fn ids(products: &[&Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_all_and_empty_query_returns_full_catalog_in_order() {
        let catalog = catalog();
        let result = visible(catalog.products(), &CategoryFilter::All, "");
        assert_eq!(ids(&result), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_category_and_query_combine() {
        let catalog = catalog();
        let category = CategoryFilter::parse("electronics");
        let result = visible(catalog.products(), &category, "pro");
        assert_eq!(ids(&result), vec![2, 4]);
    }

    #[test]
    fn test_query_matches_name_only_within_category() {
        let products = Catalog::from_json(
            br#"[
                {"id": 1, "name": "Laptop Gaming", "category": "electronics",
                 "price": 1, "description": "..."},
                {"id": 2, "name": "Smartphone Pro", "category": "electronics",
                 "price": 1, "description": "5G"}
            ]"#,
        )
        .unwrap();
        let result = visible(
            products.products(),
            &CategoryFilter::parse("electronics"),
            "pro",
        );
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn test_query_is_case_insensitive_on_description() {
        let catalog = catalog();
        let result = visible(catalog.products(), &CategoryFilter::All, "PROFESSIONAL");
        assert_eq!(ids(&result), vec![3]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let catalog = catalog();
        let result = visible(catalog.products(), &CategoryFilter::parse("toys"), "");
        assert!(result.is_empty());
    }

    #[test]
    fn test_parse_sentinels() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("todos"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("electrónica"),
            CategoryFilter::Only("electrónica".to_string())
        );
    }

    #[test]
    fn test_category_match_is_exact() {
        let catalog = catalog();
        let result = visible(catalog.products(), &CategoryFilter::parse("Electronics"), "");
        assert!(result.is_empty());
    }
}
