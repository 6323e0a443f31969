//! Runs [`Action`]s against the order service.
//!
//! Each action becomes one tokio task. The task awaits the endpoint and
//! posts the reply back to the event loop as a [`Message`], tagged with the
//! request id it was started with, so the UI never blocks on the network.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::OrdertabError;
use crate::api::{self, ApiClient};
use crate::auth::Session;

use super::event::{Action, Message};

/// Executes actions in the background.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<ApiClient>,
    session: Option<Arc<Session>>,
    tx: mpsc::UnboundedSender<Message>,
}

impl Dispatcher {
    /// Creates a dispatcher. Without a session every action replies with
    /// [`OrdertabError::NotLoggedIn`].
    pub fn new(
        client: ApiClient,
        session: Option<Session>,
        tx: mpsc::UnboundedSender<Message>,
    ) -> Self {
        Self {
            client: Arc::new(client),
            session: session.map(Arc::new),
            tx,
        }
    }

    /// Spawns the task for `action`.
    pub fn dispatch(&self, action: Action) {
        debug!(?action, "dispatching");
        match action {
            Action::FetchOrders(request) => self.run(
                |client, session| async move { api::orders::list(&client, &session).await },
                move |result| Message::OrdersLoaded { request, result },
            ),
            Action::FetchOrder { request, order_id } => self.run(
                move |client, session| async move {
                    api::orders::detail(&client, &session, order_id).await
                },
                move |result| Message::OrderLoaded {
                    request,
                    order_id,
                    result,
                },
            ),
            Action::FetchEditorOrder { request, order_id } => self.run(
                move |client, session| async move {
                    api::orders::detail(&client, &session, order_id).await
                },
                move |result| Message::EditorOrderLoaded {
                    request,
                    order_id,
                    result,
                },
            ),
            Action::FetchCatalog {
                request,
                restaurant_id,
            } => self.run(
                move |client, session| async move {
                    api::restaurants::detail(&client, &session, restaurant_id).await
                },
                move |result| Message::CatalogLoaded {
                    request,
                    restaurant_id,
                    result,
                },
            ),
            Action::DeleteOrder { request, order_id } => self.run(
                move |client, session| async move {
                    api::orders::delete(&client, &session, order_id).await
                },
                move |result| Message::OrderDeleted {
                    request,
                    order_id,
                    result,
                },
            ),
            Action::DeleteLine {
                request,
                order,
                product_id,
                product_name,
            } => {
                let order_id = order.id;
                self.run(
                    move |client, session| async move {
                        api::orders::delete_line(&client, &session, &order, product_id).await
                    },
                    move |result| Message::LineDeleted {
                        request,
                        order_id,
                        product_name,
                        result,
                    },
                )
            }
            Action::CreateOrder { request, body } => {
                let target = super::app::EditTarget::New(body.restaurant_id());
                self.run(
                    move |client, session| async move {
                        api::orders::create(&client, &session, &body).await
                    },
                    move |result| Message::OrderSaved {
                        request,
                        target,
                        result,
                    },
                )
            }
            Action::UpdateOrder {
                request,
                order_id,
                body,
            } => self.run(
                move |client, session| async move {
                    api::orders::update(&client, &session, order_id, &body).await
                },
                move |result| Message::OrderSaved {
                    request,
                    target: super::app::EditTarget::Existing(order_id),
                    result,
                },
            ),
        }
    }

    /// Spawns `call` with the shared client and session and sends its
    /// result through `into_message`.
    fn run<T, C, Fut, M>(&self, call: C, into_message: M)
    where
        T: Send + 'static,
        C: FnOnce(Arc<ApiClient>, Arc<Session>) -> Fut + Send + 'static,
        Fut: Future<Output = crate::Result<T>> + Send + 'static,
        M: FnOnce(crate::Result<T>) -> Message + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        let session = self.session.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match session {
                Some(session) => call(client, session).await,
                None => Err(OrdertabError::NotLoggedIn),
            };
            if tx.send(into_message(result)).is_err() {
                warn!("event loop closed, dropping reply");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::ApiConfig;
    use crate::tui::request::{RequestSlot, RequestTracker};

    fn offline_client() -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ca_cert: None,
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn missing_session_short_circuits() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(offline_client(), None, tx);
        let request = RequestTracker::new().begin(RequestSlot::OrderList);

        let message = tokio_test::block_on(async {
            dispatcher.dispatch(Action::FetchOrders(request));
            rx.recv().await
        });

        match message {
            Some(Message::OrdersLoaded {
                request: replied,
                result: Err(OrdertabError::NotLoggedIn),
            }) => assert_eq!(replied, request),
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
