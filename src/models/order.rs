//! Order models.
//!
//! An order is confirmed once the restaurant stamps `startedAt`; until
//! then it is pending and its lines may still be edited or removed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderId, Product, ProductId, Restaurant, RestaurantId};

/// Fulfillment status of an order.
///
/// Unknown values sent by the service are preserved in [`OrderStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    InProcess,
    Sent,
    Delivered,
    Other(String),
}

impl OrderStatus {
    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::InProcess => "in process",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "in process" => Self::InProcess,
            "sent" => Self::Sent,
            "delivered" => Self::Delivered,
            _ => Self::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Join-table data attached to each product of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedQuantity {
    pub quantity: u32,
    /// Price charged per unit when the order was placed.
    #[serde(default, rename = "unityPrice")]
    pub unit_price: Option<Decimal>,
}

/// One line of an order: a product plus the ordered quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedProduct {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "OrderProducts")]
    pub line: OrderedQuantity,
}

impl OrderedProduct {
    /// Unit price of the line: the price recorded on the order, falling
    /// back to the current catalog price.
    pub fn unit_price(&self) -> Decimal {
        self.line.unit_price.unwrap_or(self.product.price)
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.line.quantity)
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub created_at: String,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub delivered_at: Option<String>,
    /// Total as cached by the service; see [`Order::computed_total`].
    pub price: Decimal,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub shipping_costs: Decimal,
    pub restaurant_id: RestaurantId,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub status: OrderStatus,
    #[serde(default)]
    pub restaurant: Option<Restaurant>,
    #[serde(default)]
    pub products: Vec<OrderedProduct>,
}

impl Order {
    /// Whether the restaurant has started the order.
    pub fn is_confirmed(&self) -> bool {
        self.started_at.is_some()
    }

    /// Whether the customer may still change or delete the order.
    pub fn is_editable(&self) -> bool {
        !self.is_confirmed() && self.status == OrderStatus::Pending
    }

    /// Sum of the line totals, without shipping.
    pub fn subtotal(&self) -> Decimal {
        self.products.iter().map(OrderedProduct::line_total).sum()
    }

    /// Lines plus shipping, derived from the current quantities.
    pub fn computed_total(&self) -> Decimal {
        self.subtotal() + self.shipping_costs
    }

    /// Whether the cached `price` disagrees with the derived total.
    ///
    /// Only meaningful when the lines were fetched (detail endpoint).
    pub fn has_stale_total(&self) -> bool {
        !self.products.is_empty() && self.price != self.computed_total()
    }

    /// Quantity ordered of `product_id`, or zero.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.products
            .iter()
            .find(|p| p.product.id == product_id)
            .map_or(0, |p| p.line.quantity)
    }

    /// Logo path of the embedded restaurant, if any.
    pub fn restaurant_logo(&self) -> Option<&str> {
        self.restaurant.as_ref().and_then(|r| r.logo.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(id: ProductId, price: Decimal, quantity: u32) -> OrderedProduct {
        OrderedProduct {
            product: Product {
                id,
                name: format!("product {id}"),
                description: None,
                price,
                image: None,
                availability: true,
            },
            line: OrderedQuantity {
                quantity,
                unit_price: None,
            },
        }
    }

    fn order(products: Vec<OrderedProduct>) -> Order {
        Order {
            id: 1,
            created_at: "2024-01-15T10:30:00.000Z".to_string(),
            started_at: None,
            sent_at: None,
            delivered_at: None,
            price: dec!(0),
            address: "Calle Falsa 123".to_string(),
            shipping_costs: dec!(2.50),
            restaurant_id: 7,
            user_id: Some(3),
            status: OrderStatus::Pending,
            restaurant: None,
            products,
        }
    }

    #[test]
    fn status_round_trips_known_and_unknown_values() {
        let s: OrderStatus = serde_json::from_str("\"in process\"").unwrap();
        assert_eq!(s, OrderStatus::InProcess);

        let s: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(s, OrderStatus::Other("cancelled".to_string()));
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"cancelled\"");
    }

    #[test]
    fn computed_total_includes_shipping() {
        let o = order(vec![line(1, dec!(5.00), 3), line(2, dec!(1.25), 2)]);
        assert_eq!(o.subtotal(), dec!(17.50));
        assert_eq!(o.computed_total(), dec!(20.00));
        assert!(o.has_stale_total());
    }

    #[test]
    fn recorded_unit_price_wins_over_catalog_price() {
        let mut l = line(1, dec!(5.00), 2);
        l.line.unit_price = Some(dec!(4.00));
        assert_eq!(l.line_total(), dec!(8.00));
    }

    #[test]
    fn started_order_is_not_editable() {
        let mut o = order(vec![]);
        assert!(o.is_editable());

        o.started_at = Some("2024-01-15T11:00:00.000Z".to_string());
        assert!(o.is_confirmed());
        assert!(!o.is_editable());
    }

    #[test]
    fn quantity_of_missing_product_is_zero() {
        let o = order(vec![line(1, dec!(5.00), 3)]);
        assert_eq!(o.quantity_of(1), 3);
        assert_eq!(o.quantity_of(99), 0);
    }
}
