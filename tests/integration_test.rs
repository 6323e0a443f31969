//! Tests against a running order service.
//!
//! They need the service reachable at `ORDERTAB_API_BASE_URL` and a seeded
//! customer in `ORDERTAB_EMAIL` / `ORDERTAB_PASSWORD`.
//! Run with: `cargo test --features integration-tests`

#![cfg(feature = "integration-tests")]

use ordertab::api::{ApiClient, orders, restaurants};
use ordertab::auth::{self, Session};
use ordertab::config::fetch_config;
use ordertab::models::{LineRequest, NewOrder, OrderUpdate};
use ordertab::orders::classify;

async fn connect() -> (ApiClient, Session) {
    let config = fetch_config().expect("config");
    let login = config.login.as_ref().expect("ORDERTAB_EMAIL and ORDERTAB_PASSWORD");
    let client = ApiClient::new(&config.api).expect("client");
    let session = auth::login(&client, &login.email, &login.password)
        .await
        .expect("login");
    (client, session)
}

#[tokio::test]
async fn test_list_and_classify_own_orders() {
    let (client, session) = connect().await;
    let list = orders::list(&client, &session).await.expect("list");
    let total = list.len();
    let buckets = classify(list);
    assert_eq!(buckets.len(), total);
    assert!(buckets.confirmed.iter().all(|o| o.started_at.is_some()));
    assert!(buckets.pending.iter().all(|o| o.started_at.is_none()));
}

#[tokio::test]
async fn test_create_edit_and_delete_order() {
    let (client, session) = connect().await;

    let list = orders::list(&client, &session).await.expect("list");
    let restaurant_id = list.first().expect("customer has an order").restaurant_id;
    let restaurant = restaurants::detail(&client, &session, restaurant_id)
        .await
        .expect("restaurant");
    let product = restaurant
        .products
        .iter()
        .find(|p| p.availability)
        .expect("an available product");

    let body = NewOrder::new(
        restaurant_id,
        "Integration test address",
        vec![LineRequest {
            product_id: product.id,
            quantity: 1,
        }],
    )
    .expect("valid order");
    let created = orders::create(&client, &session, &body).await.expect("create");
    assert!(created.started_at.is_none());

    let update = OrderUpdate::new(
        "Integration test address",
        vec![LineRequest {
            product_id: product.id,
            quantity: 2,
        }],
    )
    .expect("valid update");
    orders::update(&client, &session, created.id, &update)
        .await
        .expect("update");
    let detail = orders::detail(&client, &session, created.id)
        .await
        .expect("detail");
    assert_eq!(detail.quantity_of(product.id), 2);

    orders::delete(&client, &session, created.id)
        .await
        .expect("delete");
    let after = orders::list(&client, &session).await.expect("list");
    assert!(after.iter().all(|o| o.id != created.id));
}
