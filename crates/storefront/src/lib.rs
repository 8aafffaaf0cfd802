//! Tienda Storefront library.
//!
//! This crate provides the storefront server as a library so the binary,
//! the router tests and the integration tests all build the same app.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod htmx;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod views;

pub use routes::app;
