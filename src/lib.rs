//! Terminal client for a food delivery order service.
//!
//! Lists a customer's orders split into confirmed and pending ones, shows
//! an order's lines, and lets the customer edit quantities of a pending
//! order, place a new one, or remove orders and products. The order service
//! is reached over its REST API; all state lives there.

pub mod api;
pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod orders;
pub mod tls;
pub mod tui;

pub use error::{OrdertabError, Result};
