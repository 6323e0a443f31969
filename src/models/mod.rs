//! Wire models for the order service REST API.
//!
//! The service speaks camelCase JSON; every type here renames its fields
//! accordingly. Currency amounts are [`rust_decimal::Decimal`].

pub mod order;
pub mod payload;
pub mod product;
pub mod restaurant;
pub mod user;

pub use order::{Order, OrderStatus, OrderedProduct, OrderedQuantity};
pub use payload::{LineRequest, NewOrder, OrderUpdate, PayloadError};
pub use product::Product;
pub use restaurant::{Restaurant, RestaurantCategory};
pub use user::User;

/// Identifier of an order.
pub type OrderId = u64;

/// Identifier of a catalog product.
pub type ProductId = u64;

/// Identifier of a restaurant.
pub type RestaurantId = u64;

/// Resolves a stored relative image path to an absolute URL.
///
/// Joins `base_url` and `path` with exactly one `/` between them.
pub fn image_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_joins_with_single_slash() {
        assert_eq!(
            image_url("http://localhost:3000", "public/logo.png"),
            "http://localhost:3000/public/logo.png"
        );
        assert_eq!(
            image_url("http://localhost:3000/", "/public/logo.png"),
            "http://localhost:3000/public/logo.png"
        );
    }
}
