//! Client-side order logic.
//!
//! - [`classify`] splits a customer's orders into confirmed and pending
//! - [`pricing`] keeps quantities and line prices of an order being composed

pub mod classify;
pub mod pricing;

pub use classify::{OrderBuckets, classify};
pub use pricing::{LineItemPricer, PricingError, parse_quantity};
