//! Home page route handler.
//!
//! The whole shop is one page: filter bar, product grid, cart panel and
//! contact form. Later interactions swap fragments in place.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use tower_sessions::Session;
use tracing::instrument;

use super::products::GridQuery;
use crate::services::CartStore;
use crate::state::AppState;
use crate::views::{CartView, ContactFormView, GridView};

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub grid: GridView,
    pub cart: CartView,
    pub count: u32,
    pub contact: ContactFormView,
}

/// Display the shop.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<GridQuery>,
) -> impl IntoResponse {
    let catalog = state.catalog().snapshot();
    let store = CartStore::restore(session).await;
    let cart = CartView::from(store.cart());

    HomeTemplate {
        grid: GridView::build(&catalog, &query.category, &query.q),
        count: cart.item_count,
        cart,
        contact: ContactFormView::default(),
    }
}
