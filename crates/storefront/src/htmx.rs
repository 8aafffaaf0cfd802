//! HTMX response helpers.
//!
//! Handlers tell the page what happened through an `HX-Trigger` header. The
//! client script listens for:
//!
//! - `notify` - show a toast (`{level, message}`) for two seconds
//! - `cart-updated` - refresh the cart count and cart panel
//! - `checkout-ready` - open the order summary, close the cart panel and
//!   scroll to the contact section (sent as `HX-Trigger-After-Swap` so the
//!   summary is already in the dialog)
//! - `contact-sent` - scroll back to the top of the page

use std::convert::Infallible;
use std::fmt::Write as _;

use axum::http::{HeaderName, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};
use serde_json::{Map, Value};
use tienda_core::Notification;

/// The HTMX response header carrying client-side events.
pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// Events fired once the response body has been swapped in.
pub const HX_TRIGGER_AFTER_SWAP: HeaderName = HeaderName::from_static("hx-trigger-after-swap");

/// Builder for the `HX-Trigger` family of headers.
#[derive(Debug)]
pub struct HxTrigger {
    header: HeaderName,
    events: Map<String, Value>,
}

impl Default for HxTrigger {
    fn default() -> Self {
        Self {
            header: HX_TRIGGER,
            events: Map::new(),
        }
    }
}

impl HxTrigger {
    /// Events fired as soon as the response arrives.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events fired after the response body is swapped into the page.
    #[must_use]
    pub fn after_swap() -> Self {
        Self {
            header: HX_TRIGGER_AFTER_SWAP,
            events: Map::new(),
        }
    }

    /// Show a toast notification.
    #[must_use]
    pub fn notify(self, notification: &Notification) -> Self {
        let value = serde_json::to_value(notification).unwrap_or(Value::Null);
        self.event("notify", value)
    }

    /// Show the notification if there is one.
    #[must_use]
    pub fn notify_opt(self, notification: Option<&Notification>) -> Self {
        match notification {
            Some(notification) => self.notify(notification),
            None => self,
        }
    }

    /// Ask the page to refresh cart fragments.
    #[must_use]
    pub fn cart_updated(self) -> Self {
        self.event("cart-updated", Value::Bool(true))
    }

    /// Fire an arbitrary event.
    #[must_use]
    pub fn event(mut self, name: &str, detail: Value) -> Self {
        self.events.insert(name.to_string(), detail);
        self
    }

    /// The header value, or `None` when no event was added.
    #[must_use]
    pub fn header_value(&self) -> Option<HeaderValue> {
        if self.events.is_empty() {
            return None;
        }
        let json = Value::Object(self.events.clone()).to_string();
        HeaderValue::from_str(&escape_non_ascii(&json)).ok()
    }
}

impl IntoResponseParts for HxTrigger {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(value) = self.header_value() {
            res.headers_mut().insert(self.header, value);
        }
        Ok(res)
    }
}

/// Escape non-ASCII characters as JSON `\uXXXX` sequences.
///
/// Header values must be visible ASCII; every non-ASCII char in serialized
/// JSON sits inside a string literal, so escaping keeps the JSON equivalent.
fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{unit:04x}");
            }
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::response::IntoResponse;

    use super::*;

    #[test]
    fn test_empty_trigger_has_no_header() {
        assert!(HxTrigger::new().header_value().is_none());
    }

    #[test]
    fn test_notify_header_is_ascii_json() {
        let header = HxTrigger::new()
            .notify(&Notification::warning("⚠️ Tu carrito está vacío"))
            .header_value()
            .unwrap();

        let raw = header.to_str().unwrap();
        assert!(raw.is_ascii());

        let parsed: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed["notify"]["level"], "warning");
        assert_eq!(parsed["notify"]["message"], "⚠️ Tu carrito está vacío");
    }

    #[test]
    fn test_multiple_events() {
        let header = HxTrigger::new()
            .notify(&Notification::success("ok"))
            .cart_updated()
            .header_value()
            .unwrap();

        let parsed: Value = serde_json::from_str(header.to_str().unwrap()).unwrap();
        assert_eq!(parsed["cart-updated"], true);
        assert_eq!(parsed["notify"]["message"], "ok");
    }

    #[test]
    fn test_after_swap_uses_its_own_header() {
        let response = (
            HxTrigger::after_swap().event("checkout-ready", Value::Bool(true)),
            (),
        )
            .into_response();

        assert!(response.headers().get(HX_TRIGGER).is_none());
        let raw = response.headers().get(HX_TRIGGER_AFTER_SWAP).unwrap();
        assert_eq!(raw.to_str().unwrap(), r#"{"checkout-ready":true}"#);
    }

    #[test]
    fn test_escape_astral_plane_uses_surrogates() {
        assert_eq!(escape_non_ascii("📦"), "\\ud83d\\udce6");
    }
}
