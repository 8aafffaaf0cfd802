//! Storefront-side models.
//!
//! Domain types live in `tienda-core`; this module only holds what is
//! specific to how the storefront stores state.

pub mod session;

pub use session::keys as session_keys;
