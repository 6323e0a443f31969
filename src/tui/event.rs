//! Event handling for the TUI.
//!
//! [`update`] is the only place application state changes. Terminal input
//! and service replies arrive as [`Message`]s; anything that needs the
//! network is returned as an [`Action`] for the
//! [`Dispatcher`](super::dispatch::Dispatcher) to run.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::models::{
    NewOrder, Order, OrderId, OrderUpdate, ProductId, Restaurant, RestaurantId,
};
use crate::orders::{LineItemPricer, classify};

use super::app::{App, Confirmation, EditTarget, Focus, Mode, Screen};
use super::request::{RequestId, RequestSlot};

/// Shown in place of the sections when no orders are available.
pub const NO_ORDERS_TEXT: &str = "No orders were retrieved. Are you logged in?";

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// Reply to [`Action::FetchOrders`].
    OrdersLoaded {
        request: RequestId,
        result: crate::Result<Vec<Order>>,
    },
    /// Reply to [`Action::FetchOrder`].
    OrderLoaded {
        request: RequestId,
        order_id: OrderId,
        result: crate::Result<Order>,
    },
    /// Reply to [`Action::FetchEditorOrder`].
    EditorOrderLoaded {
        request: RequestId,
        order_id: OrderId,
        result: crate::Result<Order>,
    },
    /// Reply to [`Action::FetchCatalog`].
    CatalogLoaded {
        request: RequestId,
        restaurant_id: RestaurantId,
        result: crate::Result<Restaurant>,
    },

    /// Reply to [`Action::DeleteOrder`].
    OrderDeleted {
        request: RequestId,
        order_id: OrderId,
        result: crate::Result<()>,
    },
    /// Reply to [`Action::DeleteLine`].
    LineDeleted {
        request: RequestId,
        order_id: OrderId,
        product_name: String,
        result: crate::Result<Order>,
    },
    /// Reply to [`Action::CreateOrder`] or [`Action::UpdateOrder`].
    OrderSaved {
        request: RequestId,
        target: EditTarget,
        result: crate::Result<Order>,
    },

    /// Request to quit the application.
    Quit,
}

/// Requests to the order service, executed outside of [`update`].
#[derive(Debug)]
pub enum Action {
    /// `GET orders`.
    FetchOrders(RequestId),
    /// `GET orders/{id}` for the detail screen.
    FetchOrder { request: RequestId, order_id: OrderId },
    /// `GET orders/{id}` for the editor.
    FetchEditorOrder { request: RequestId, order_id: OrderId },
    /// `GET restaurants/{id}` for the editor catalog.
    FetchCatalog {
        request: RequestId,
        restaurant_id: RestaurantId,
    },
    /// `DELETE orders/{id}`.
    DeleteOrder { request: RequestId, order_id: OrderId },
    /// Replace the order's lines without `product_id`.
    DeleteLine {
        request: RequestId,
        order: Box<Order>,
        product_id: ProductId,
        product_name: String,
    },
    /// `POST orders`.
    CreateOrder { request: RequestId, body: NewOrder },
    /// `PUT orders/{id}`.
    UpdateOrder {
        request: RequestId,
        order_id: OrderId,
        body: OrderUpdate,
    },
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Initial action: load the orders screen.
pub fn start(app: &mut App) -> Option<Action> {
    fetch_orders(app)
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::OrdersLoaded { request, result } => {
            if !app.accept_reply(RequestSlot::OrderList, request) {
                return None;
            }
            match result {
                Ok(orders) => {
                    let buckets = classify(orders);
                    info!(
                        confirmed = buckets.confirmed.len(),
                        pending = buckets.pending.len(),
                        "orders loaded"
                    );
                    app.orders.set_buckets(Some(buckets));
                }
                Err(e) => {
                    error!(error = %e, "failed to load orders");
                    app.orders.set_buckets(None);
                    app.show_error(format!(
                        "There was an error while retrieving the orders. {e}"
                    ));
                }
            }
            None
        }
        Message::OrderLoaded {
            request,
            order_id,
            result,
        } => {
            if !app.accept_reply(RequestSlot::OrderDetail, request) {
                return None;
            }
            match result {
                Ok(order) => {
                    if let Some(detail) = app.detail.as_mut()
                        && detail.order_id == order_id
                    {
                        detail.selected = detail
                            .selected
                            .min(order.products.len().saturating_sub(1));
                        detail.order = Some(order);
                    }
                }
                Err(e) => {
                    error!(order_id, error = %e, "failed to load order");
                    app.show_error(detail_error(order_id, &e));
                }
            }
            None
        }
        Message::EditorOrderLoaded {
            request,
            order_id,
            result,
        } => {
            if !app.accept_reply(RequestSlot::EditorOrder, request) {
                return None;
            }
            match result {
                Ok(order) if !order.is_editable() => {
                    app.show_error(format!(
                        "Order {order_id} has been confirmed and can no longer be edited"
                    ));
                    go_back(app)
                }
                Ok(order) => {
                    let restaurant_id = order.restaurant_id;
                    let editor = app.editor.as_mut()?;
                    editor.address.set(&order.address);
                    editor.order = Some(order);
                    let request = app.begin_request(RequestSlot::EditorCatalog);
                    Some(Action::FetchCatalog {
                        request,
                        restaurant_id,
                    })
                }
                Err(e) => {
                    error!(order_id, error = %e, "failed to load order for editing");
                    app.show_error(detail_error(order_id, &e));
                    None
                }
            }
        }
        Message::CatalogLoaded {
            request,
            restaurant_id,
            result,
        } => {
            if !app.accept_reply(RequestSlot::EditorCatalog, request) {
                return None;
            }
            match result {
                Ok(restaurant) => {
                    let editor = app.editor.as_mut()?;
                    let catalog = restaurant.products.clone();
                    let pricer = match &editor.order {
                        Some(order) => LineItemPricer::for_order(catalog, order),
                        None => LineItemPricer::new(catalog),
                    };
                    editor.pricer = Some(pricer);
                    editor.restaurant = Some(restaurant);
                    editor.selected = 0;
                    editor.sync_quantity_input();
                }
                Err(e) => {
                    error!(restaurant_id, error = %e, "failed to load restaurant");
                    app.show_error(format!(
                        "There was an error while retrieving the restaurant (id {restaurant_id}). {e}"
                    ));
                }
            }
            None
        }
        Message::OrderDeleted {
            request,
            order_id,
            result,
        } => {
            if !app.accept_reply(RequestSlot::Mutation, request) {
                return None;
            }
            match result {
                Ok(()) => {
                    info!(order_id, "order removed");
                    app.show_success(format!("Order {order_id} successfully removed"));
                    mark_orders_dirty(app)
                }
                Err(e) => {
                    error!(order_id, error = %e, "failed to remove order");
                    app.show_error(format!("Order {order_id} could not be removed. {e}"));
                    None
                }
            }
        }
        Message::LineDeleted {
            request,
            order_id,
            product_name,
            result,
        } => {
            if !app.accept_reply(RequestSlot::Mutation, request) {
                return None;
            }
            match result {
                Ok(_) => {
                    info!(order_id, product = %product_name, "product removed from order");
                    app.show_success(format!("Product {product_name} successfully removed"));
                    app.orders.dirty = true;
                    let showing_detail = app.current_screen() == &Screen::OrderDetail(order_id);
                    if showing_detail {
                        let request = app.begin_request(RequestSlot::OrderDetail);
                        return Some(Action::FetchOrder { request, order_id });
                    }
                    mark_orders_dirty(app)
                }
                Err(e) => {
                    error!(order_id, product = %product_name, error = %e, "failed to remove product");
                    app.show_error(format!(
                        "Product {product_name} could not be removed. {e}"
                    ));
                    None
                }
            }
        }
        Message::OrderSaved {
            request,
            target,
            result,
        } => {
            if !app.accept_reply(RequestSlot::Mutation, request) {
                return None;
            }
            match result {
                Ok(order) => {
                    let verb = match target {
                        EditTarget::Existing(_) => "updated",
                        EditTarget::New(_) => "created",
                    };
                    info!(order_id = order.id, "order {verb}");
                    app.show_success(format!("Order {} successfully {verb}", order.id));
                    if app.current_screen() == &Screen::EditOrder(target) {
                        app.pop_to_root();
                    }
                    mark_orders_dirty(app)
                }
                Err(e) => {
                    error!(?target, error = %e, "failed to save order");
                    if let Some(editor) = app.editor.as_mut()
                        && editor.target == target
                    {
                        editor.backend_errors = match e.validation_messages() {
                            [] => vec![e.to_string()],
                            messages => messages.to_vec(),
                        };
                    }
                    let subject = match target {
                        EditTarget::Existing(id) => format!("Order {id}"),
                        EditTarget::New(_) => "The order".to_string(),
                    };
                    app.show_error(format!("{subject} could not be saved. {e}"));
                    None
                }
            }
        }
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

fn detail_error(order_id: OrderId, e: &crate::OrdertabError) -> String {
    format!("There was an error while retrieving order details (id {order_id}). {e}")
}

/// Starts a fetch of the orders list, unless there is no one to fetch for.
fn fetch_orders(app: &mut App) -> Option<Action> {
    app.orders.dirty = false;
    if !app.is_logged_in() {
        app.orders.set_buckets(None);
        return None;
    }
    let request = app.begin_request(RequestSlot::OrderList);
    Some(Action::FetchOrders(request))
}

/// Flags the orders list for a refetch, fetching now if it is showing.
fn mark_orders_dirty(app: &mut App) -> Option<Action> {
    app.orders.dirty = true;
    if app.current_screen() == &Screen::Orders {
        return fetch_orders(app);
    }
    None
}

/// Leaves the current screen, refetching the list if it became dirty.
fn go_back(app: &mut App) -> Option<Action> {
    app.pop()?;
    if app.current_screen() == &Screen::Orders && app.orders.dirty {
        return fetch_orders(app);
    }
    None
}

fn open_detail(app: &mut App, order_id: OrderId) -> Option<Action> {
    app.push(Screen::OrderDetail(order_id));
    let request = app.begin_request(RequestSlot::OrderDetail);
    Some(Action::FetchOrder { request, order_id })
}

fn open_editor(app: &mut App, target: EditTarget) -> Option<Action> {
    app.push(Screen::EditOrder(target));
    match target {
        EditTarget::Existing(order_id) => {
            let request = app.begin_request(RequestSlot::EditorOrder);
            Some(Action::FetchEditorOrder { request, order_id })
        }
        EditTarget::New(restaurant_id) => {
            let request = app.begin_request(RequestSlot::EditorCatalog);
            Some(Action::FetchCatalog {
                request,
                restaurant_id,
            })
        }
    }
}

fn ask(app: &mut App, confirmation: Confirmation) {
    app.confirmation = Some(confirmation);
    app.mode = Mode::Confirm;
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_flash();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Global keys (work in any mode)
    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() && app.mode == Mode::Normal => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Esc if app.mode == Mode::Normal => return go_back(app),
        _ => {}
    }

    // Mode-specific handling
    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
        Mode::Confirm => handle_confirm_mode(app, key),
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match *app.current_screen() {
        Screen::Orders => handle_orders_keys(app, key),
        Screen::OrderDetail(order_id) => handle_detail_keys(app, key, order_id),
        Screen::EditOrder(_) => handle_editor_keys(app, key),
    }
}

/// Handles keys for the orders screen.
fn handle_orders_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.orders.selected + 1 < app.orders.row_count() {
                app.orders.selected += 1;
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.orders.selected = app.orders.selected.saturating_sub(1);
            None
        }
        KeyCode::Char('r') => fetch_orders(app),
        KeyCode::Enter => {
            let order_id = app.orders.selected_order()?.id;
            open_detail(app, order_id)
        }
        KeyCode::Char('d') => {
            let order = app.orders.selected_order()?;
            let id = order.id;
            if order.is_editable() {
                ask(app, Confirmation::DeleteOrder(id));
            } else if order.is_confirmed() {
                app.show_error(format!("Order {id} has been confirmed and cannot be removed"));
            } else {
                app.show_error(format!("Order {id} can no longer be removed"));
            }
            None
        }
        KeyCode::Char('e') => {
            let order = app.orders.selected_order()?;
            let id = order.id;
            if order.is_editable() {
                open_editor(app, EditTarget::Existing(id))
            } else {
                app.show_error(format!("Order {id} can no longer be edited"));
                None
            }
        }
        KeyCode::Char('n') => {
            let restaurant_id = app.orders.selected_order()?.restaurant_id;
            open_editor(app, EditTarget::New(restaurant_id))
        }
        _ => None,
    }
}

/// Handles keys for the order detail screen.
fn handle_detail_keys(app: &mut App, key: KeyEvent, order_id: OrderId) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            let detail = app.detail.as_mut()?;
            let lines = detail.order.as_ref().map_or(0, |o| o.products.len());
            if detail.selected + 1 < lines {
                detail.selected += 1;
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let detail = app.detail.as_mut()?;
            detail.selected = detail.selected.saturating_sub(1);
            None
        }
        KeyCode::Char('r') => {
            let request = app.begin_request(RequestSlot::OrderDetail);
            Some(Action::FetchOrder { request, order_id })
        }
        KeyCode::Char('d') => {
            let detail = app.detail.as_ref()?;
            let editable = detail.order.as_ref()?.is_editable();
            let (product_id, name) = detail.selected_line()?;
            let name = name.to_string();
            if editable {
                ask(
                    app,
                    Confirmation::DeleteLine {
                        order_id,
                        product_id,
                        name,
                    },
                );
            } else {
                app.show_error(format!("Order {order_id} can no longer be edited"));
            }
            None
        }
        KeyCode::Char('e') => {
            let editable = app.detail.as_ref()?.order.as_ref()?.is_editable();
            if editable {
                open_editor(app, EditTarget::Existing(order_id))
            } else {
                app.show_error(format!("Order {order_id} can no longer be edited"));
                None
            }
        }
        _ => None,
    }
}

/// Handles keys for the order editor.
fn handle_editor_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    let editor = app.editor.as_mut()?;
    let rows = editor.pricer.as_ref().map_or(0, |p| p.products().len());
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if editor.selected + 1 < rows {
                editor.selected += 1;
                editor.sync_quantity_input();
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if editor.selected > 0 {
                editor.selected -= 1;
                editor.sync_quantity_input();
            }
            None
        }
        KeyCode::Char('i') | KeyCode::Enter if rows > 0 => {
            editor.quantity_input.move_end();
            app.focus = Focus::Quantity;
            app.mode = Mode::Insert;
            None
        }
        KeyCode::Char('a') => {
            editor.address.move_end();
            app.focus = Focus::Address;
            app.mode = Mode::Insert;
            None
        }
        KeyCode::Char('s') if editor.pricer.is_some() => {
            ask(app, Confirmation::SubmitOrder);
            None
        }
        _ => None,
    }
}

/// Handles keys in insert mode (text input).
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    let focus = app.focus;
    let Some(editor) = app.editor.as_mut() else {
        app.mode = Mode::Normal;
        return None;
    };

    if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
        // Show the quantity that was actually applied.
        if focus == Focus::Quantity {
            editor.sync_quantity_input();
        }
        app.mode = Mode::Normal;
        return None;
    }

    let input = match focus {
        Focus::Quantity => &mut editor.quantity_input,
        Focus::Address => &mut editor.address,
    };
    let changed = match key.code {
        KeyCode::Char(c) => {
            input.insert(c);
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete();
            true
        }
        KeyCode::Left => {
            input.move_left();
            false
        }
        KeyCode::Right => {
            input.move_right();
            false
        }
        KeyCode::Home => {
            input.move_home();
            false
        }
        KeyCode::End => {
            input.move_end();
            false
        }
        _ => false,
    };

    if changed
        && focus == Focus::Quantity
        && let Some(product_id) = editor.selected_product()
        && let Some(pricer) = editor.pricer.as_mut()
    {
        // Rejected input leaves the previous quantity in place.
        let _ = pricer.set_quantity(product_id, editor.quantity_input.as_str());
    }
    None
}

/// Handles keys in confirm mode (dialogs).
fn handle_confirm_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.mode = Mode::Normal;
            let confirmation = app.confirmation.take()?;
            confirm(app, confirmation)
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.mode = Mode::Normal;
            app.confirmation = None;
            None
        }
        _ => None,
    }
}

/// Runs a confirmed mutation.
fn confirm(app: &mut App, confirmation: Confirmation) -> Option<Action> {
    if app.requests.is_pending(RequestSlot::Mutation) {
        app.show_error("Another change is still being saved");
        return None;
    }

    match confirmation {
        Confirmation::DeleteOrder(order_id) => {
            let request = app.begin_request(RequestSlot::Mutation);
            Some(Action::DeleteOrder { request, order_id })
        }
        Confirmation::DeleteLine {
            order_id,
            product_id,
            name,
        } => {
            let order = app
                .detail
                .as_ref()
                .and_then(|d| d.order.as_ref())
                .filter(|o| o.id == order_id)?
                .clone();
            let request = app.begin_request(RequestSlot::Mutation);
            Some(Action::DeleteLine {
                request,
                order: Box::new(order),
                product_id,
                product_name: name,
            })
        }
        Confirmation::SubmitOrder => submit_editor(app),
    }
}

/// Builds the editor's payload, or records why it cannot be sent.
fn submit_editor(app: &mut App) -> Option<Action> {
    let editor = app.editor.as_ref()?;
    let lines = editor.pricer.as_ref()?.submission_lines();
    let address = editor.address.as_str();

    let built = match editor.target {
        EditTarget::Existing(order_id) => {
            OrderUpdate::new(address, lines).map(|body| Payload::Update(order_id, body))
        }
        EditTarget::New(restaurant_id) => {
            NewOrder::new(restaurant_id, address, lines).map(Payload::Create)
        }
    };

    match built {
        Ok(payload) => {
            if let Some(editor) = app.editor.as_mut() {
                editor.backend_errors.clear();
            }
            let request = app.begin_request(RequestSlot::Mutation);
            Some(match payload {
                Payload::Update(order_id, body) => Action::UpdateOrder {
                    request,
                    order_id,
                    body,
                },
                Payload::Create(body) => Action::CreateOrder { request, body },
            })
        }
        Err(e) => {
            if let Some(editor) = app.editor.as_mut() {
                editor.backend_errors = vec![e.to_string()];
            }
            None
        }
    }
}

enum Payload {
    Update(OrderId, OrderUpdate),
    Create(NewOrder),
}
