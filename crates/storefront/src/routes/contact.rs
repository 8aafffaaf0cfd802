//! Contact form route handler.
//!
//! Submitting the form hands the customer's details and a snapshot of the
//! cart to the configured contact sink, then empties the cart. Nothing is
//! charged; the shop follows up by email.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tienda_core::{
    CartAction, ContactDetails, ContactError, ContactSubmission, Notification, messages,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::htmx::HxTrigger;
use crate::services::CartStore;
use crate::state::AppState;
use crate::views::ContactFormView;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
}

/// Contact form fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/contact_form.html")]
pub struct ContactFormTemplate {
    pub contact: ContactFormView,
}

/// Handle a contact form submission.
///
/// Invalid input re-renders the form with the entered values and an inline
/// error. On success the form comes back empty and the cart is cleared. If
/// delivery fails the cart is kept so the customer can retry.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    let details = match ContactDetails::parse(&form.name, &form.email, &form.phone, &form.message)
    {
        Ok(details) => details,
        Err(e) => {
            tracing::debug!(error = %e, "Contact form rejected");
            let contact = ContactFormView {
                error: Some(field_error(&e).to_string()),
                name: form.name,
                email: form.email,
                phone: form.phone,
                message: form.message,
            };
            return Ok((
                HxTrigger::new().notify(&Notification::warning(messages::CONTACT_INVALID)),
                ContactFormTemplate { contact },
            )
                .into_response());
        }
    };

    let catalog = state.catalog().snapshot();
    let mut store = CartStore::restore(session).await;
    let submission = ContactSubmission::new(details, store.cart(), Utc::now());

    state.contact().submit(&submission).await?;
    add_breadcrumb("contact", "Contact form submitted", None);

    let outcome = store.apply(&catalog, CartAction::Clear).await?;
    let mut trigger = HxTrigger::new()
        .notify(&Notification::success(messages::CONTACT_SENT))
        .event("contact-sent", Value::Bool(true));
    if outcome.changed {
        trigger = trigger.cart_updated();
    }

    Ok((
        trigger,
        ContactFormTemplate {
            contact: ContactFormView::default(),
        },
    )
        .into_response())
}

const fn field_error(error: &ContactError) -> &'static str {
    match error {
        ContactError::MissingName => "Por favor ingresa tu nombre.",
        ContactError::MissingMessage => "Por favor escribe un mensaje.",
        ContactError::Email(_) => "Por favor ingresa un correo electrónico válido.",
    }
}
