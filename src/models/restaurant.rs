//! Restaurant and its catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Product, RestaurantId};

/// Restaurant category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantCategory {
    pub name: String,
}

/// A restaurant, optionally with its product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub shipping_costs: Decimal,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub restaurant_category: Option<RestaurantCategory>,
    /// Present on the detail endpoint only.
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Restaurant {
    /// Returns the category name or an empty string.
    pub fn category_name(&self) -> &str {
        self.restaurant_category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("")
    }
}
