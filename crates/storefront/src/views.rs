//! Template view models.
//!
//! Views are plain snapshots built from core state right before rendering.
//! Product cards and cart rows share [`MediaView`] so the image-with-emoji
//! fallback is defined once (see `templates/partials/media.html`).

use tienda_core::{Cart, CartItem, CategoryFilter, Catalog, OrderSummary, Product, visible};

/// Image with an emoji fallback.
#[derive(Clone, Debug)]
pub struct MediaView {
    pub src: String,
    pub alt: String,
    pub emoji: String,
    /// CSS modifier: `card` or `thumb`.
    pub size: &'static str,
}

impl MediaView {
    fn for_product(product: &Product, size: &'static str) -> Self {
        Self {
            src: product.image_or_placeholder().to_string(),
            alt: product.name.clone(),
            emoji: product.emoji_or_placeholder().to_string(),
            size,
        }
    }
}

/// A product card in the grid.
#[derive(Clone, Debug)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub media: MediaView,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            media: MediaView::for_product(product, "card"),
        }
    }
}

/// Category filter button.
#[derive(Clone, Debug)]
pub struct FilterButtonView {
    pub value: String,
    pub label: String,
    pub active: bool,
}

/// The filter bar and the products it lets through.
#[derive(Clone, Debug)]
pub struct GridView {
    pub filters: Vec<FilterButtonView>,
    pub category: String,
    pub query: String,
    pub products: Vec<ProductCardView>,
}

impl GridView {
    /// Apply the filter engine to the catalog and snapshot the result.
    #[must_use]
    pub fn build(catalog: &Catalog, category: &CategoryFilter, query: &str) -> Self {
        let mut filters = vec![FilterButtonView {
            value: CategoryFilter::All.as_str().to_string(),
            label: "Todos".to_string(),
            active: *category == CategoryFilter::All,
        }];
        filters.extend(catalog.categories().into_iter().map(|c| FilterButtonView {
            value: c.to_string(),
            label: capitalize(c),
            active: category.as_str() == c,
        }));

        Self {
            filters,
            category: category.as_str().to_string(),
            query: query.to_string(),
            products: visible(catalog.products(), category, query)
                .into_iter()
                .map(ProductCardView::from)
                .collect(),
        }
    }
}

/// A cart row.
#[derive(Clone, Debug)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub media: MediaView,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id().to_string(),
            name: item.product.name.clone(),
            unit_price: item.product.price.display(),
            quantity: item.quantity.get(),
            media: MediaView::for_product(&item.product, "thumb"),
        }
    }
}

/// Cart panel contents.
#[derive(Clone, Debug)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub item_count: u32,
    pub total: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            items: cart.items().iter().map(CartLineView::from).collect(),
            item_count: totals.item_count,
            total: totals.total_price.display(),
        }
    }
}

/// A line of the checkout summary dialog.
#[derive(Clone, Debug)]
pub struct SummaryLineView {
    pub name: String,
    pub quantity: u32,
    pub subtotal: String,
}

/// Checkout summary dialog contents.
#[derive(Clone, Debug)]
pub struct SummaryView {
    pub lines: Vec<SummaryLineView>,
    pub total: String,
}

impl From<&OrderSummary> for SummaryView {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            lines: summary
                .lines
                .iter()
                .map(|line| SummaryLineView {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    subtotal: line.subtotal.display(),
                })
                .collect(),
            total: summary.total.display(),
        }
    }
}

/// Contact form values, kept on validation failure and cleared on success.
#[derive(Clone, Debug, Default)]
pub struct ContactFormView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub error: Option<String>,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use tienda_core::ProductId;

    use super::*;

    #[test]
    fn test_grid_marks_active_filter() {
        let catalog = Catalog::fallback();
        let grid = GridView::build(&catalog, &CategoryFilter::parse("electrónica"), "");

        assert_eq!(grid.filters.len(), 2);
        assert!(!grid.filters[0].active);
        assert!(grid.filters[1].active);
        assert_eq!(grid.filters[1].label, "Electrónica");
        assert_eq!(grid.products.len(), 3);
    }

    #[test]
    fn test_grid_applies_query() {
        let catalog = Catalog::fallback();
        let grid = GridView::build(&catalog, &CategoryFilter::All, "5g");

        assert_eq!(grid.products.len(), 1);
        assert_eq!(grid.products[0].name, "Smartphone Pro");
        assert_eq!(grid.products[0].price, "$899.99");
    }

    #[test]
    fn test_media_falls_back_to_placeholders() {
        let catalog = Catalog::from_json(br#"[{"id": 1, "name": "Taza", "price": 4}]"#).unwrap();
        let card = ProductCardView::from(&catalog.products()[0]);

        assert_eq!(card.media.src, tienda_core::catalog::PLACEHOLDER_IMAGE);
        assert_eq!(card.media.emoji, tienda_core::catalog::PLACEHOLDER_EMOJI);
        assert_eq!(card.media.size, "card");
    }

    #[test]
    fn test_cart_view_totals() {
        let catalog = Catalog::fallback();
        let mut cart = Cart::new();
        cart.add(catalog.find(ProductId::new(3)).unwrap());
        cart.add(catalog.find(ProductId::new(3)).unwrap());

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.total, "$299.98");
        assert_eq!(view.items[0].media.size, "thumb");
    }
}
