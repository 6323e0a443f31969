//! Quantity and line-price state for an order being composed.
//!
//! Lines are keyed by product id rather than by position, so filtering or
//! reordering the catalog never moves a quantity to the wrong product.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{LineRequest, Order, Product, ProductId};

/// Quantity and derived price of one catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PricedLine {
    quantity: u32,
    price: Decimal,
}

/// Tracks how many units of each catalog product are in the order.
///
/// A product without an entry has quantity zero and is not part of the
/// submission.
#[derive(Debug, Clone)]
pub struct LineItemPricer {
    catalog: Vec<Product>,
    lines: HashMap<ProductId, PricedLine>,
}

impl LineItemPricer {
    /// Creates a pricer over `catalog` with every quantity absent.
    pub fn new(catalog: Vec<Product>) -> Self {
        Self {
            catalog,
            lines: HashMap::new(),
        }
    }

    /// Creates a pricer seeded with existing quantities.
    ///
    /// Seeds for products missing from the catalog are skipped.
    pub fn with_quantities(
        catalog: Vec<Product>,
        seed: impl IntoIterator<Item = (ProductId, u32)>,
    ) -> Self {
        let mut pricer = Self::new(catalog);
        for (product_id, quantity) in seed {
            if pricer.apply(product_id, quantity).is_err() {
                debug!(product_id, "seeded product not in catalog, skipping");
            }
        }
        pricer
    }

    /// Creates a pricer seeded with the lines of an existing order.
    ///
    /// Ordered products the catalog no longer lists are appended to it at
    /// the unit price recorded on the order, so a full-replace submission
    /// keeps them.
    pub fn for_order(mut catalog: Vec<Product>, order: &Order) -> Self {
        for line in &order.products {
            if !catalog.iter().any(|p| p.id == line.product.id) {
                debug!(
                    product_id = line.product.id,
                    "ordered product not in catalog, carrying it over"
                );
                catalog.push(Product {
                    price: line.unit_price(),
                    ..line.product.clone()
                });
            }
        }
        Self::with_quantities(
            catalog,
            order
                .products
                .iter()
                .map(|line| (line.product.id, line.line.quantity)),
        )
    }

    /// Catalog in display order.
    pub fn products(&self) -> &[Product] {
        &self.catalog
    }

    /// Sets the quantity of `product_id` from free-form user text and
    /// recomputes that line's price. Other lines are untouched.
    ///
    /// Blank text clears the line. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownProduct`] if the product is not in the
    /// catalog and [`PricingError::InvalidQuantity`] if the text is not a
    /// non-negative whole number. In both cases no state changes.
    pub fn set_quantity(&mut self, product_id: ProductId, raw: &str) -> Result<u32, PricingError> {
        let quantity = parse_quantity(raw)?;
        self.apply(product_id, quantity)?;
        Ok(quantity)
    }

    fn apply(&mut self, product_id: ProductId, quantity: u32) -> Result<(), PricingError> {
        let unit_price = self
            .catalog
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| p.price)
            .ok_or(PricingError::UnknownProduct(product_id))?;

        if quantity == 0 {
            self.lines.remove(&product_id);
        } else {
            self.lines.insert(
                product_id,
                PricedLine {
                    quantity,
                    price: unit_price * Decimal::from(quantity),
                },
            );
        }
        Ok(())
    }

    /// Current quantity of `product_id` (zero when absent).
    pub fn quantity(&self, product_id: ProductId) -> u32 {
        self.lines.get(&product_id).map_or(0, |l| l.quantity)
    }

    /// Current line price of `product_id` (zero when absent).
    pub fn line_price(&self, product_id: ProductId) -> Decimal {
        self.lines.get(&product_id).map_or(Decimal::ZERO, |l| l.price)
    }

    /// Sum of all line prices.
    pub fn subtotal(&self) -> Decimal {
        self.lines.values().map(|l| l.price).sum()
    }

    /// Subtotal plus `shipping_costs`.
    pub fn total_with_shipping(&self, shipping_costs: Decimal) -> Decimal {
        self.subtotal() + shipping_costs
    }

    /// Whether no product has a positive quantity.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The (product, quantity) pairs to submit, in catalog order.
    /// Products with zero quantity are left out.
    pub fn submission_lines(&self) -> Vec<LineRequest> {
        self.catalog
            .iter()
            .filter_map(|p| {
                self.lines.get(&p.id).map(|l| LineRequest {
                    product_id: p.id,
                    quantity: l.quantity,
                })
            })
            .collect()
    }
}

/// Parses a quantity typed by the user.
///
/// Surrounding whitespace is ignored and blank input means zero. Signs,
/// decimals and any other characters are rejected.
///
/// # Errors
///
/// Returns [`PricingError::InvalidQuantity`] with the raw text.
pub fn parse_quantity(raw: &str) -> Result<u32, PricingError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PricingError::InvalidQuantity(raw.to_string()));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| PricingError::InvalidQuantity(raw.to_string()))
}

/// Reason a quantity update was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// The product is not in the catalog being priced.
    UnknownProduct(ProductId),
    /// The text is not a non-negative whole number.
    InvalidQuantity(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProduct(id) => write!(f, "product {id} is not in the catalog"),
            Self::InvalidQuantity(raw) => write!(f, "invalid quantity {raw:?}"),
        }
    }
}

impl std::error::Error for PricingError {}
