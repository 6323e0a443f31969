//! Deserialization tests for the order service payloads.

mod common;

use rust_decimal_macros::dec;

use ordertab::models::{LineRequest, NewOrder, OrderStatus, OrderUpdate, image_url};
use ordertab::orders::classify;

#[test]
fn test_orders_list_deserializes() {
    let orders = common::orders();
    assert_eq!(orders.len(), 5);

    let first = &orders[0];
    assert_eq!(first.id, 5);
    assert_eq!(first.status, OrderStatus::Pending);
    assert_eq!(first.price, dec!(27.5));
    assert_eq!(first.shipping_costs, dec!(2.5));
    assert_eq!(first.address, "Calle Larios 5, Málaga");
    assert!(first.started_at.is_none());
    assert!(first.products.is_empty());
    assert_eq!(
        first.restaurant.as_ref().map(|r| r.name.as_str()),
        Some("Casa Félix")
    );

    assert_eq!(orders[1].status, OrderStatus::Sent);
    assert_eq!(orders[3].status, OrderStatus::Delivered);
    assert!(orders[3].delivered_at.is_some());
}

#[test]
fn test_order_detail_lines() {
    let order = common::order_detail();
    assert_eq!(order.id, 3);
    assert_eq!(order.products.len(), 2);

    let croquetas = &order.products[1];
    assert_eq!(croquetas.product.name, "Croquetas");
    assert_eq!(croquetas.product.price, dec!(3));
    assert!(croquetas.product.description.is_none());
    assert_eq!(croquetas.line.quantity, 1);
    // The price recorded on the order wins over today's catalog price.
    assert_eq!(croquetas.unit_price(), dec!(2.5));

    assert_eq!(order.subtotal(), dec!(7.5));
    assert_eq!(order.computed_total(), dec!(10.0));
    assert!(order.has_stale_total());
    assert_eq!(order.quantity_of(1), 2);
    assert_eq!(order.quantity_of(99), 0);
}

#[test]
fn test_restaurant_catalog() {
    let restaurant = common::restaurant();
    assert_eq!(restaurant.category_name(), "Spanish");
    assert_eq!(restaurant.shipping_costs, dec!(2.5));
    assert_eq!(restaurant.products.len(), 4);
    assert_eq!(restaurant.products[3].price, dec!(12.75));
    assert!(!restaurant.products[3].availability);
    assert!(restaurant.products[1].availability);
}

#[test]
fn test_login_user() {
    let user = common::customer();
    assert_eq!(user.display_name(), "Customer One");
    assert_eq!(user.token.as_deref(), Some("b4c6e5f3d2a1"));
    assert!(!format!("{user:?}").contains("b4c6e5f3d2a1"));
}

#[test]
fn test_logo_resolves_against_base_url() {
    let order = common::order_detail();
    let logo = order.restaurant_logo().expect("logo");
    assert_eq!(
        image_url("http://localhost:3000/", logo),
        "http://localhost:3000/public/restaurants/casafelix.jpeg"
    );
}

#[test]
fn test_fixture_classifies_two_confirmed_three_pending() {
    let buckets = classify(common::orders());
    let confirmed: Vec<u64> = buckets.confirmed.iter().map(|o| o.id).collect();
    let pending: Vec<u64> = buckets.pending.iter().map(|o| o.id).collect();
    assert_eq!(confirmed, vec![4, 2]);
    assert_eq!(pending, vec![5, 3, 1]);
}

#[test]
fn test_payloads_serialize_camel_case() {
    let body = NewOrder::new(
        1,
        "  Calle Larios 5 ",
        vec![LineRequest {
            product_id: 2,
            quantity: 3,
        }],
    )
    .expect("valid order");
    let json = serde_json::to_value(&body).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "restaurantId": 1,
            "address": "Calle Larios 5",
            "products": [{ "productId": 2, "quantity": 3 }]
        })
    );

    let update = OrderUpdate::without_product(&common::order_detail(), 3).expect("one line left");
    let json = serde_json::to_value(&update).expect("serialize");
    assert_eq!(json["products"], serde_json::json!([{ "productId": 1, "quantity": 2 }]));
    assert_eq!(json["address"], "Avenida de Andalucía 12");
}
