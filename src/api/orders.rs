//! Order endpoints.
//!
//! Every call takes the customer [`Session`] explicitly; the service
//! scopes `GET orders` to the session's user.

use tracing::{info, instrument};

use super::ApiClient;
use crate::Result;
use crate::auth::Session;
use crate::models::{NewOrder, Order, OrderId, OrderUpdate, ProductId};

/// `GET orders`: the customer's own orders.
///
/// # Errors
///
/// Returns an error if the request fails or the body is not an order list.
#[instrument(skip(client, session))]
pub async fn list(client: &ApiClient, session: &Session) -> Result<Vec<Order>> {
    let orders: Vec<Order> = client.get("orders", Some(session)).await?;
    info!(count = orders.len(), "fetched orders");
    Ok(orders)
}

/// `GET orders/{id}`: one order with restaurant and lines.
///
/// # Errors
///
/// Returns an error if the request fails or the order does not exist.
#[instrument(skip(client, session))]
pub async fn detail(client: &ApiClient, session: &Session, id: OrderId) -> Result<Order> {
    client.get(&format!("orders/{id}"), Some(session)).await
}

/// `POST orders`: places a new order.
///
/// # Errors
///
/// Returns [`OrdertabError::Validation`](crate::OrdertabError::Validation)
/// if the service rejects the fields.
#[instrument(skip(client, session, body), fields(restaurant_id = body.restaurant_id()))]
pub async fn create(client: &ApiClient, session: &Session, body: &NewOrder) -> Result<Order> {
    let order: Order = client.post("orders", body, Some(session)).await?;
    info!(order_id = order.id, "order created");
    Ok(order)
}

/// `PUT orders/{id}`: replaces the address and lines of a pending order.
///
/// # Errors
///
/// Returns an error if the service rejects the update, e.g. because the
/// restaurant already started the order.
#[instrument(skip(client, session, body))]
pub async fn update(
    client: &ApiClient,
    session: &Session,
    id: OrderId,
    body: &OrderUpdate,
) -> Result<Order> {
    let order: Order = client.put(&format!("orders/{id}"), body, Some(session)).await?;
    info!(order_id = order.id, lines = body.products().len(), "order updated");
    Ok(order)
}

/// `DELETE orders/{id}`: removes a pending order.
///
/// # Errors
///
/// Returns an error if the service refuses the deletion.
#[instrument(skip(client, session))]
pub async fn delete(client: &ApiClient, session: &Session, id: OrderId) -> Result<()> {
    client.destroy(&format!("orders/{id}"), Some(session)).await?;
    info!(order_id = id, "order deleted");
    Ok(())
}

/// Removes one product from a pending order by replacing the order with
/// its remaining lines.
///
/// # Errors
///
/// Returns [`OrdertabError::Validation`](crate::OrdertabError::Validation)
/// without contacting the service if the product is not in the order or is
/// its only line.
#[instrument(skip(client, session, order), fields(order_id = order.id))]
pub async fn delete_line(
    client: &ApiClient,
    session: &Session,
    order: &Order,
    product_id: ProductId,
) -> Result<Order> {
    let body = OrderUpdate::without_product(order, product_id)
        .map_err(|e| crate::OrdertabError::Validation(vec![e.to_string()]))?;
    update(client, session, order.id, &body).await
}
