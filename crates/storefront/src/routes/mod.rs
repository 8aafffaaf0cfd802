//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - The shop (filter bar, grid, cart panel, contact form)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog loaded)
//!
//! # Products (HTMX fragments)
//! GET  /products/grid          - Product grid for ?category=&q=
//!
//! # Cart (HTMX fragments)
//! GET  /cart/panel             - Cart items and total
//! GET  /cart/count             - Cart count badge
//! POST /cart/add               - Add one unit (returns count badge, triggers cart-updated)
//! POST /cart/remove            - Remove a line (returns cart panel)
//!
//! # Checkout
//! POST /checkout               - Order summary fragment (triggers checkout-ready)
//!
//! # Contact
//! POST /contact                - Submit contact form with cart snapshot
//!
//! # Assets
//! GET  /static/*               - CSS and JS
//! GET  /images/*               - Product images
//! ```

pub mod cart;
pub mod contact;
pub mod home;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionStore;

use crate::middleware::{create_session_layer, request_id_middleware, session_lock_middleware};
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/panel", get(cart::panel))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create all page and fragment routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product grid fragment
        .route("/products/grid", get(products::grid))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout summary
        .route("/checkout", post(cart::checkout))
        // Contact form
        .route("/contact", post(contact::submit))
}

/// Build the full application with health checks, assets and middleware.
///
/// Generic over the session store so the server can run against `PostgreSQL`
/// in production and an in-memory store in development and tests.
pub fn app<S>(state: AppState, store: S) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = create_session_layer(store, state.config());
    let static_dir = state.config().static_dir.clone();
    let session_locks = state.session_locks().clone();

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .nest_service("/static", ServeDir::new(&static_dir))
        .nest_service("/images", ServeDir::new(static_dir.join("images")))
        .layer(session_layer)
        // Outside the session layer so its trailing save happens under the lock
        .layer(from_fn_with_state(session_locks, session_lock_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable until the catalog has loaded.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
