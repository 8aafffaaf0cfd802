//! Session-related types.
//!
//! The session is the per-browser durable key-value store. Each key holds a
//! JSON value.

/// Session keys.
pub mod keys {
    /// Key for the cart line items (JSON array of cart items).
    pub const CART: &str = "cart";
}
