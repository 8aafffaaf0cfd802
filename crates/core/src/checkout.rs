//! Order summaries and contact submissions.
//!
//! Checkout never places an order. It produces an [`OrderSummary`] for the
//! customer to confirm, and the contact form later bundles the customer's
//! details with a cart snapshot into a [`ContactSubmission`].

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;
use crate::types::{Email, EmailError, Price};

/// One line of an order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub name: String,
    pub quantity: u32,
    pub subtotal: Price,
}

/// Human-readable summary of a non-empty cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub item_count: u32,
    pub total: Price,
}

impl OrderSummary {
    /// Summarize a cart. Returns `None` for an empty cart.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Option<Self> {
        if cart.is_empty() {
            return None;
        }

        let totals = cart.totals();
        let lines = cart
            .items()
            .iter()
            .map(|item| SummaryLine {
                name: item.product.name.clone(),
                quantity: item.quantity.get(),
                subtotal: item.line_total(),
            })
            .collect();

        Some(Self {
            lines,
            item_count: totals.item_count,
            total: totals.total_price,
        })
    }

    /// Plain-text rendering, one line per item followed by the total.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::from("📦 Resumen de tu pedido:\n\n");
        for line in &self.lines {
            let _ = writeln!(out, "{} x{} - {}", line.name, line.quantity, line.subtotal);
        }
        let _ = write!(
            out,
            "\n💰 Total: {}\n\n📧 Por favor completa el formulario de contacto para finalizar tu compra.",
            self.total
        );
        out
    }
}

/// Why contact form input was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("name is required")]
    MissingName,
    #[error("message is required")]
    MissingMessage,
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),
}

/// Validated contact form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub message: String,
}

impl ContactDetails {
    /// Validate and trim raw form input.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError`] if the name or message is blank, or the
    /// email is malformed.
    pub fn parse(name: &str, email: &str, phone: &str, message: &str) -> Result<Self, ContactError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ContactError::MissingName);
        }
        let message = message.trim();
        if message.is_empty() {
            return Err(ContactError::MissingMessage);
        }
        let email = Email::parse(email)?;

        Ok(Self {
            name: name.to_string(),
            email,
            phone: phone.trim().to_string(),
            message: message.to_string(),
        })
    }
}

/// Contact details plus the cart as it stood when the form was sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(flatten)]
    pub details: ContactDetails,
    pub cart: Cart,
    pub total: Price,
    pub timestamp: DateTime<Utc>,
}

impl ContactSubmission {
    /// Bundle contact details with a copy of the cart.
    #[must_use]
    pub fn new(details: ContactDetails, cart: &Cart, timestamp: DateTime<Utc>) -> Self {
        Self {
            details,
            total: cart.totals().total_price,
            cart: cart.clone(),
            timestamp,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::catalog::Catalog;
    use crate::types::ProductId;

    fn cart_with(ids: &[i64]) -> Cart {
        let catalog = Catalog::fallback();
        let mut cart = Cart::new();
        for id in ids {
            cart.add(catalog.find(ProductId::new(*id)).unwrap());
        }
        cart
    }

    #[test]
    fn test_summary_of_empty_cart_is_none() {
        assert!(OrderSummary::from_cart(&Cart::new()).is_none());
    }

    #[test]
    fn test_summary_lines_and_total() {
        let summary = OrderSummary::from_cart(&cart_with(&[3, 3, 2])).unwrap();

        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].name, "Auriculares Bluetooth");
        assert_eq!(summary.lines[0].quantity, 2);
        assert_eq!(summary.lines[0].subtotal.display(), "$299.98");
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total.display(), "$1199.97");
    }

    #[test]
    fn test_summary_text() {
        let summary = OrderSummary::from_cart(&cart_with(&[2])).unwrap();
        let text = summary.to_text();

        assert!(text.contains("Smartphone Pro x1 - $899.99"));
        assert!(text.contains("💰 Total: $899.99"));
    }

    #[test]
    fn test_contact_details_trims_and_validates() {
        let details =
            ContactDetails::parse("  Ana ", "Ana@Example.com", " 555 ", " Hola ").unwrap();
        assert_eq!(details.name, "Ana");
        assert_eq!(details.email.as_str(), "ana@example.com");
        assert_eq!(details.phone, "555");
        assert_eq!(details.message, "Hola");
    }

    #[test]
    fn test_contact_details_rejects_blank_fields() {
        assert_eq!(
            ContactDetails::parse(" ", "a@b.co", "", "hi"),
            Err(ContactError::MissingName)
        );
        assert_eq!(
            ContactDetails::parse("Ana", "a@b.co", "", "  "),
            Err(ContactError::MissingMessage)
        );
        assert!(matches!(
            ContactDetails::parse("Ana", "nope", "", "hi"),
            Err(ContactError::Email(_))
        ));
    }

    #[test]
    fn test_submission_record_shape() {
        let details = ContactDetails::parse("Ana", "ana@example.com", "", "Quiero comprar").unwrap();
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let submission = ContactSubmission::new(details, &cart_with(&[1, 1]), timestamp);

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["cart"][0]["quantity"], 2);
        assert_eq!(json["total"], 2599.98);
        assert_eq!(json["timestamp"], "2024-05-01T12:00:00Z");
    }
}
