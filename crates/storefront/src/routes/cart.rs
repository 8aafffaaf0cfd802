//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every handler restores the cart from the session, dispatches one action
//! and renders a fragment; mutations are persisted before the response is
//! built.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;
use tienda_core::{CartAction, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::htmx::HxTrigger;
use crate::services::CartStore;
use crate::state::AppState;
use crate::views::{CartView, SummaryView};

/// Add/remove form data.
#[derive(Debug, Deserialize)]
pub struct CartForm {
    pub product_id: ProductId,
}

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Checkout summary fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout_summary.html")]
pub struct CheckoutSummaryTemplate {
    pub summary: SummaryView,
}

/// Render the cart panel (items and total).
#[instrument(skip_all)]
pub async fn panel(session: Session) -> impl IntoResponse {
    let store = CartStore::restore(session).await;
    CartPanelTemplate {
        cart: CartView::from(store.cart()),
    }
}

/// Get cart count badge (HTMX).
#[instrument(skip_all)]
pub async fn count(session: Session) -> impl IntoResponse {
    let store = CartStore::restore(session).await;
    CartCountTemplate {
        count: store.cart().totals().item_count,
    }
}

/// Add one unit of a product to the cart (HTMX).
///
/// Unknown product ids are ignored without a notification. Returns the
/// updated count badge and triggers a cart refresh.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartForm>,
) -> Result<Response> {
    let catalog = state.catalog().snapshot();
    let mut store = CartStore::restore(session).await;
    let outcome = store
        .apply(&catalog, CartAction::Add(form.product_id))
        .await?;

    let mut trigger = HxTrigger::new().notify_opt(outcome.notification.as_ref());
    if outcome.changed {
        let product_id = form.product_id.to_string();
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
        trigger = trigger.cart_updated();
    }

    Ok((
        trigger,
        CartCountTemplate {
            count: store.cart().totals().item_count,
        },
    )
        .into_response())
}

/// Remove a product's line from the cart (HTMX).
///
/// Returns the updated cart panel.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartForm>,
) -> Result<Response> {
    let catalog = state.catalog().snapshot();
    let mut store = CartStore::restore(session).await;
    let outcome = store
        .apply(&catalog, CartAction::Remove(form.product_id))
        .await?;

    let mut trigger = HxTrigger::new().notify_opt(outcome.notification.as_ref());
    if outcome.changed {
        let product_id = form.product_id.to_string();
        add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", product_id.as_str())]));
        trigger = trigger.cart_updated();
    }

    Ok((
        trigger,
        CartPanelTemplate {
            cart: CartView::from(store.cart()),
        },
    )
        .into_response())
}

/// Summarize the cart for confirmation (HTMX).
///
/// Nothing is transmitted and the cart is left as is. An empty cart gets a
/// warning and no content; otherwise the summary fragment is returned along
/// with a `checkout-ready` event that opens it and moves the page to the
/// contact form.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let catalog = state.catalog().snapshot();
    let mut store = CartStore::restore(session).await;
    let outcome = store.apply(&catalog, CartAction::Checkout).await?;

    let Some(summary) = outcome.summary else {
        return Ok((
            StatusCode::NO_CONTENT,
            HxTrigger::new().notify_opt(outcome.notification.as_ref()),
            (),
        )
            .into_response());
    };

    add_breadcrumb("checkout", "Checkout summary shown", None);
    tracing::info!(
        items = summary.item_count,
        total = %summary.total,
        "Checkout summary prepared"
    );

    Ok((
        HxTrigger::after_swap().event("checkout-ready", Value::Bool(true)),
        CheckoutSummaryTemplate {
            summary: SummaryView::from(&summary),
        },
    )
        .into_response())
}
