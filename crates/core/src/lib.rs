//! Tienda Core - Storefront domain library.
//!
//! This crate provides the state and rules shared by the Tienda components:
//! - `storefront` - Server-rendered single-page shop
//! - `cli` - Offline catalog tooling
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no session access. Callers restore state, hand it to [`intent::dispatch`],
//! persist the result and render from snapshots.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices and emails
//! - [`catalog`] - Products and the read-only catalog
//! - [`filter`] - Category and text filtering of the catalog
//! - [`cart`] - Cart line items, totals and the stored snapshot
//! - [`checkout`] - Order summaries and contact submissions
//! - [`intent`] - Cart actions and the reducer that applies them

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod filter;
pub mod intent;
pub mod types;

pub use cart::{Cart, CartItem, CartTotals};
pub use catalog::{Catalog, CatalogError, CatalogIssue, Product};
pub use checkout::{ContactDetails, ContactError, ContactSubmission, OrderSummary, SummaryLine};
pub use filter::{CategoryFilter, visible};
pub use intent::{CartAction, Notification, NotificationLevel, Outcome, dispatch, messages};
pub use types::*;
