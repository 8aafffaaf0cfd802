//! Product grid route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use tienda_core::CategoryFilter;
use tracing::instrument;

use crate::state::AppState;
use crate::views::GridView;

/// Filter and search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct GridQuery {
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub q: String,
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/products_grid.html")]
pub struct ProductsGridTemplate {
    pub grid: GridView,
}

/// Render the visible products for a category and search query.
///
/// An empty match renders the empty state, never an error. While the catalog
/// is still loading the grid is simply empty.
#[instrument(skip(state))]
pub async fn grid(
    State(state): State<AppState>,
    Query(query): Query<GridQuery>,
) -> impl IntoResponse {
    let catalog = state.catalog().snapshot();
    ProductsGridTemplate {
        grid: GridView::build(&catalog, &query.category, &query.q),
    }
}
