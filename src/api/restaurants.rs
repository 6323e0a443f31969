//! Restaurant endpoints used while composing an order.

use tracing::instrument;

use super::ApiClient;
use crate::Result;
use crate::auth::Session;
use crate::models::{Restaurant, RestaurantId};

/// `GET restaurants/{id}`: restaurant with its product catalog.
///
/// # Errors
///
/// Returns an error if the request fails or the restaurant does not exist.
#[instrument(skip(client, session))]
pub async fn detail(client: &ApiClient, session: &Session, id: RestaurantId) -> Result<Restaurant> {
    client.get(&format!("restaurants/{id}"), Some(session)).await
}
