//! Request bodies for creating and replacing orders.
//!
//! Both payloads are validated on construction so that an obviously
//! invalid order never reaches the service.

use serde::Serialize;

use super::{Order, ProductId, RestaurantId};

/// A product and the quantity ordered of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Body of `POST orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    restaurant_id: RestaurantId,
    address: String,
    products: Vec<LineRequest>,
}

impl NewOrder {
    /// Validates and builds a new order body.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is blank, there are no lines, or a
    /// line has zero quantity.
    pub fn new(
        restaurant_id: RestaurantId,
        address: &str,
        products: Vec<LineRequest>,
    ) -> Result<Self, PayloadError> {
        let address = validate(address, &products)?;
        Ok(Self {
            restaurant_id,
            address,
            products,
        })
    }

    pub fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    pub fn products(&self) -> &[LineRequest] {
        &self.products
    }
}

/// Body of `PUT orders/{id}`.
///
/// The service replaces the editable fields wholesale: lines missing from
/// `products` are removed from the order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    address: String,
    products: Vec<LineRequest>,
}

impl OrderUpdate {
    /// Validates and builds a replacement body.
    ///
    /// # Errors
    ///
    /// Same rules as [`NewOrder::new`].
    pub fn new(address: &str, products: Vec<LineRequest>) -> Result<Self, PayloadError> {
        let address = validate(address, &products)?;
        Ok(Self { address, products })
    }

    /// Builds the body that keeps every line of `order` except `product_id`.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::UnknownProduct`] if the order has no such
    /// line and [`PayloadError::NoLines`] if it was the last one.
    pub fn without_product(order: &Order, product_id: ProductId) -> Result<Self, PayloadError> {
        if !order.products.iter().any(|p| p.product.id == product_id) {
            return Err(PayloadError::UnknownProduct(product_id));
        }
        let products = order
            .products
            .iter()
            .filter(|p| p.product.id != product_id)
            .map(|p| LineRequest {
                product_id: p.product.id,
                quantity: p.line.quantity,
            })
            .collect();
        Self::new(&order.address, products)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn products(&self) -> &[LineRequest] {
        &self.products
    }
}

fn validate(address: &str, products: &[LineRequest]) -> Result<String, PayloadError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(PayloadError::BlankAddress);
    }
    if products.is_empty() {
        return Err(PayloadError::NoLines);
    }
    if let Some(line) = products.iter().find(|l| l.quantity == 0) {
        return Err(PayloadError::ZeroQuantity(line.product_id));
    }
    Ok(address.to_string())
}

/// Errors that can occur when building an order payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// The delivery address is empty.
    BlankAddress,
    /// The order would contain no products.
    NoLines,
    /// A line was submitted with quantity zero.
    ZeroQuantity(ProductId),
    /// The product is not part of the order.
    UnknownProduct(ProductId),
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankAddress => write!(f, "a delivery address is required"),
            Self::NoLines => write!(f, "an order needs at least one product"),
            Self::ZeroQuantity(id) => write!(f, "product {id} has quantity zero"),
            Self::UnknownProduct(id) => write!(f, "product {id} is not part of the order"),
        }
    }
}

impl std::error::Error for PayloadError {}
