//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Route handlers that can fail return
//! `Result<T, AppError>`.
//!
//! Most failures in the shop are not errors at all: an unknown product id is
//! a no-op, a corrupt stored cart restores empty, a failed catalog load falls
//! back to sample products. `AppError` only covers what is left.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tienda_core::{Notification, messages};

use crate::htmx::HxTrigger;
use crate::services::{CartStoreError, ContactSinkError};

/// Toast shown when the cart could not be saved.
const CART_FAILED: &str = "No pudimos guardar tu carrito. Inténtalo de nuevo.";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Writing the cart to the session store failed.
    #[error("Session error: {0}")]
    Session(#[from] CartStoreError),

    /// Delivering a contact submission failed.
    #[error("Contact error: {0}")]
    Contact(#[from] ContactSinkError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every variant is a server-side failure
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Request error"
        );

        // Don't expose internal error details to clients
        let (status, message, notice) = match &self {
            Self::Session(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                CART_FAILED,
            ),
            Self::Contact(_) => (
                StatusCode::BAD_GATEWAY,
                "External service error",
                messages::CONTACT_FAILED,
            ),
        };

        // HTMX does not swap error responses, but it still fires triggers
        (
            status,
            HxTrigger::new().notify(&Notification::error(notice)),
            message,
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tower_sessions::{session, session_store};

    use super::*;
    use crate::htmx::HX_TRIGGER;

    fn session_error() -> AppError {
        AppError::Session(CartStoreError::from(session::Error::Store(
            session_store::Error::Backend("db down".to_string()),
        )))
    }

    fn contact_error() -> AppError {
        AppError::Contact(ContactSinkError::Api {
            status: 503,
            message: "down".to_string(),
        })
    }

    fn notify(response: &Response) -> serde_json::Value {
        let raw = response.headers().get(HX_TRIGGER).unwrap().to_str().unwrap();
        serde_json::from_str::<serde_json::Value>(raw).unwrap()["notify"].clone()
    }

    #[test]
    fn test_app_error_display() {
        assert_eq!(
            contact_error().to_string(),
            "Contact error: Webhook error: 503 - down"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            session_error().into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            contact_error().into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_app_error_carries_notification() {
        let response = session_error().into_response();
        let notice = notify(&response);
        assert_eq!(notice["level"], "error");
        assert_eq!(notice["message"], CART_FAILED);

        let response = contact_error().into_response();
        assert_eq!(notify(&response)["message"], messages::CONTACT_FAILED);
    }
}
