//! Cart actions and the reducer that applies them.
//!
//! Handlers never mutate a [`Cart`] directly. They restore it, call
//! [`dispatch`], persist when [`Outcome::changed`] is set, and render from
//! the result.

use serde::Serialize;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::checkout::OrderSummary;
use crate::types::ProductId;

/// Something the customer asked the cart to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Add(ProductId),
    Remove(ProductId),
    /// Empty the cart after a contact submission.
    Clear,
    /// Summarize the cart for confirmation. Never mutates.
    Checkout,
}

/// Notification severity, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// A short user-facing message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Fixed user-facing messages.
pub mod messages {
    pub const ADDED: &str = "✓ Producto agregado al carrito";
    pub const REMOVED: &str = "🗑️ Producto eliminado del carrito";
    pub const EMPTY_CART: &str = "⚠️ Tu carrito está vacío";
    pub const CONTACT_SENT: &str = "✓ ¡Gracias por tu mensaje! Te contactaremos pronto.";
    pub const CONTACT_INVALID: &str = "⚠️ Revisa los datos del formulario";
    pub const CONTACT_FAILED: &str = "No pudimos enviar tu mensaje. Inténtalo de nuevo.";
}

/// Result of dispatching a [`CartAction`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Whether the cart was mutated and must be persisted.
    pub changed: bool,
    pub notification: Option<Notification>,
    /// Present only for a checkout of a non-empty cart.
    pub summary: Option<OrderSummary>,
}

/// Apply an action to the cart.
///
/// - `Add` of an id missing from the catalog is a silent no-op.
/// - `Remove` always notifies, even when the id was not in the cart, but
///   only reports a change when a line was deleted.
/// - `Checkout` of an empty cart yields a warning and no summary.
pub fn dispatch(cart: &mut Cart, catalog: &Catalog, action: CartAction) -> Outcome {
    match action {
        CartAction::Add(id) => {
            let Some(product) = catalog.find(id) else {
                return Outcome::default();
            };
            cart.add(product);
            Outcome {
                changed: true,
                notification: Some(Notification::success(messages::ADDED)),
                summary: None,
            }
        }
        CartAction::Remove(id) => Outcome {
            changed: cart.remove(id),
            notification: Some(Notification::success(messages::REMOVED)),
            summary: None,
        },
        CartAction::Clear => Outcome {
            changed: cart.clear(),
            notification: None,
            summary: None,
        },
        CartAction::Checkout => OrderSummary::from_cart(cart).map_or_else(
            || Outcome {
                changed: false,
                notification: Some(Notification::warning(messages::EMPTY_CART)),
                summary: None,
            },
            |summary| Outcome {
                changed: false,
                notification: None,
                summary: Some(summary),
            },
        ),
    }
}
