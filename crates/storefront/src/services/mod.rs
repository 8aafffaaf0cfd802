//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Session-backed cart store
//! - `contact` - Contact submission delivery (log or webhook)

pub mod cart;
pub mod contact;

pub use cart::{CartStore, CartStoreError};
pub use contact::{ContactSink, ContactSinkError, WebhookClient};
