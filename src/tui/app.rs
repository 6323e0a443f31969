//! Application state for the TUI.

use std::time::{Duration, Instant};

use tracing::debug;

use super::input::TextInput;
use super::request::{RequestId, RequestSlot, RequestTracker};
use crate::models::{Order, OrderId, ProductId, Restaurant, RestaurantId, User};
use crate::orders::{LineItemPricer, OrderBuckets};

/// How long a flash message stays visible.
const FLASH_TTL: Duration = Duration::from_secs(5);

/// Central application state container.
pub struct App {
    /// Service root, used to resolve image paths.
    pub base_url: String,
    /// Logged-in customer, if any. Read-only for the screens.
    pub user: Option<User>,

    // -- Navigation --
    /// Screen stack; the bottom entry is always [`Screen::Orders`].
    pub stack: Vec<Screen>,

    // -- Per-screen state --
    pub orders: OrdersState,
    pub detail: Option<DetailState>,
    pub editor: Option<EditorState>,

    // -- UI State --
    /// Current input mode.
    pub mode: Mode,
    /// Which editor field receives typed characters in insert mode.
    pub focus: Focus,
    /// Pending yes/no question, shown in confirm mode.
    pub confirmation: Option<Confirmation>,
    /// Transient banner (clears after a timeout).
    pub flash: Option<Flash>,

    // -- Internal --
    /// In-flight request bookkeeping.
    pub requests: RequestTracker,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App on the orders screen.
    pub fn new(base_url: impl Into<String>, user: Option<User>) -> Self {
        Self {
            base_url: base_url.into(),
            user,
            stack: vec![Screen::Orders],
            orders: OrdersState::default(),
            detail: None,
            editor: None,
            mode: Mode::Normal,
            focus: Focus::Quantity,
            confirmation: None,
            flash: None,
            requests: RequestTracker::new(),
            should_quit: false,
        }
    }

    /// Whether a customer session exists.
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Returns the screen currently shown.
    pub fn current_screen(&self) -> &Screen {
        // The root screen is never popped.
        self.stack.last().unwrap_or(&Screen::Orders)
    }

    /// Starts a request in `slot` and returns its id.
    pub fn begin_request(&mut self, slot: RequestSlot) -> RequestId {
        let id = self.requests.begin(slot);
        debug!(?slot, request = %id, "request started");
        id
    }

    /// Accepts or discards a reply. Logs discarded replies.
    pub fn accept_reply(&mut self, slot: RequestSlot, id: RequestId) -> bool {
        let accepted = self.requests.finish(slot, id);
        if !accepted {
            debug!(?slot, request = %id, "discarding stale reply");
        }
        accepted
    }

    /// Pushes a screen, initializing its state. The caller issues the
    /// fetch that fills it.
    pub fn push(&mut self, screen: Screen) {
        match &screen {
            Screen::Orders => {}
            Screen::OrderDetail(order_id) => {
                self.detail = Some(DetailState::new(*order_id));
            }
            Screen::EditOrder(target) => {
                self.editor = Some(EditorState::new(*target));
            }
        }
        self.mode = Mode::Normal;
        self.confirmation = None;
        self.stack.push(screen);
    }

    /// Pops the current screen (never the root) and drops its state and
    /// in-flight reads.
    pub fn pop(&mut self) -> Option<Screen> {
        if self.stack.len() <= 1 {
            return None;
        }
        let screen = self.stack.pop()?;
        self.discard_screen_state(&screen);
        self.mode = Mode::Normal;
        self.confirmation = None;
        Some(screen)
    }

    /// Pops everything above the orders screen.
    pub fn pop_to_root(&mut self) {
        while self.pop().is_some() {}
    }

    fn discard_screen_state(&mut self, screen: &Screen) {
        match screen {
            Screen::Orders => {}
            Screen::OrderDetail(_) => {
                self.requests.cancel(RequestSlot::OrderDetail);
                self.detail = None;
            }
            Screen::EditOrder(_) => {
                self.requests.cancel(RequestSlot::EditorOrder);
                self.requests.cancel(RequestSlot::EditorCatalog);
                self.editor = None;
            }
        }
    }

    /// Shows a success banner.
    pub fn show_success(&mut self, message: impl Into<String>) {
        self.flash = Some(Flash::new(FlashKind::Success, message.into()));
    }

    /// Shows an error banner.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.flash = Some(Flash::new(FlashKind::Error, message.into()));
    }

    /// Clears a flash message older than its time to live.
    pub fn clear_stale_flash(&mut self) {
        if let Some(ref flash) = self.flash
            && flash.timestamp.elapsed() > FLASH_TTL
        {
            self.flash = None;
        }
    }
}

/// Screens of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// The customer's orders, split into confirmed and pending.
    Orders,
    /// One order with its lines.
    OrderDetail(OrderId),
    /// Quantity editor for a pending order or a new one.
    EditOrder(EditTarget),
}

impl Screen {
    /// Returns the display title for the screen.
    pub fn title(&self) -> String {
        match self {
            Screen::Orders => "My Orders".to_string(),
            Screen::OrderDetail(id) => format!("Order {id}"),
            Screen::EditOrder(EditTarget::Existing(id)) => format!("Edit Order {id}"),
            Screen::EditOrder(EditTarget::New(_)) => "New Order".to_string(),
        }
    }
}

/// What the editor submits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditTarget {
    /// Replace the lines of an existing pending order.
    Existing(OrderId),
    /// Place a new order from a restaurant's catalog.
    New(RestaurantId),
}

/// State of the orders screen.
#[derive(Debug, Default)]
pub struct OrdersState {
    /// Classified orders; `None` until loaded or after a failed load.
    pub buckets: Option<OrderBuckets>,
    /// Selection over confirmed then pending rows.
    pub selected: usize,
    /// Refetch when this screen becomes current again.
    pub dirty: bool,
}

impl OrdersState {
    /// The selected order, if any.
    pub fn selected_order(&self) -> Option<&Order> {
        self.buckets.as_ref()?.get(self.selected)
    }

    /// Number of rows across both sections.
    pub fn row_count(&self) -> usize {
        self.buckets.as_ref().map_or(0, OrderBuckets::len)
    }

    /// Replaces the buckets and keeps the selection in range.
    pub fn set_buckets(&mut self, buckets: Option<OrderBuckets>) {
        self.buckets = buckets;
        self.selected = self.selected.min(self.row_count().saturating_sub(1));
    }
}

/// State of the order detail screen.
#[derive(Debug)]
pub struct DetailState {
    pub order_id: OrderId,
    pub order: Option<Order>,
    /// Selected line index.
    pub selected: usize,
}

impl DetailState {
    pub fn new(order_id: OrderId) -> Self {
        Self {
            order_id,
            order: None,
            selected: 0,
        }
    }

    /// Product id and name of the selected line.
    pub fn selected_line(&self) -> Option<(ProductId, &str)> {
        let line = self.order.as_ref()?.products.get(self.selected)?;
        Some((line.product.id, line.product.name.as_str()))
    }
}

/// State of the order editor.
#[derive(Debug)]
pub struct EditorState {
    pub target: EditTarget,
    /// The order being edited (existing target only).
    pub order: Option<Order>,
    /// Restaurant whose catalog is shown.
    pub restaurant: Option<Restaurant>,
    /// Quantities and prices; present once the catalog is loaded.
    pub pricer: Option<LineItemPricer>,
    /// Selected catalog index.
    pub selected: usize,
    /// Raw text of the selected product's quantity.
    pub quantity_input: TextInput,
    /// Delivery address.
    pub address: TextInput,
    /// Field errors returned by the service on the last submit.
    pub backend_errors: Vec<String>,
}

impl EditorState {
    pub fn new(target: EditTarget) -> Self {
        Self {
            target,
            order: None,
            restaurant: None,
            pricer: None,
            selected: 0,
            quantity_input: TextInput::new(),
            address: TextInput::new(),
            backend_errors: Vec::new(),
        }
    }

    /// Product id of the selected catalog row.
    pub fn selected_product(&self) -> Option<ProductId> {
        let pricer = self.pricer.as_ref()?;
        pricer.products().get(self.selected).map(|p| p.id)
    }

    /// Shipping cost shown in the totals.
    pub fn shipping_costs(&self) -> rust_decimal::Decimal {
        match (&self.order, &self.restaurant) {
            (Some(order), _) => order.shipping_costs,
            (None, Some(restaurant)) => restaurant.shipping_costs,
            (None, None) => rust_decimal::Decimal::ZERO,
        }
    }

    /// Loads the selected product's quantity into the input field.
    pub fn sync_quantity_input(&mut self) {
        let quantity = match (&self.pricer, self.selected_product()) {
            (Some(pricer), Some(id)) => pricer.quantity(id),
            _ => 0,
        };
        if quantity == 0 {
            self.quantity_input.set("");
        } else {
            self.quantity_input.set(&quantity.to_string());
        }
    }
}

/// Yes/no questions asked before a destructive or submitting action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Confirmation {
    DeleteOrder(OrderId),
    DeleteLine {
        order_id: OrderId,
        product_id: ProductId,
        name: String,
    },
    SubmitOrder,
}

impl Confirmation {
    /// Question shown to the user.
    pub fn prompt(&self) -> String {
        match self {
            Confirmation::DeleteOrder(id) => format!("Delete order {id}? (y/n)"),
            Confirmation::DeleteLine { name, .. } => format!("Remove {name} from the order? (y/n)"),
            Confirmation::SubmitOrder => "Submit this order? (y/n)".to_string(),
        }
    }
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Confirm,
}

/// Editor field focus in insert mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Quantity,
    Address,
}

/// Banner severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

/// Banner message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
    /// When the message was shown.
    pub timestamp: Instant,
}

impl Flash {
    fn new(kind: FlashKind, message: String) -> Self {
        Self {
            kind,
            message,
            timestamp: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_screen_is_never_popped() {
        let mut app = App::new("http://localhost:3000", None);
        assert_eq!(app.pop(), None);
        assert_eq!(app.current_screen(), &Screen::Orders);
    }

    #[test]
    fn popping_detail_cancels_its_fetch() {
        let mut app = App::new("http://localhost:3000", None);
        app.push(Screen::OrderDetail(4));
        let id = app.begin_request(RequestSlot::OrderDetail);

        app.pop();
        assert!(app.detail.is_none());
        assert!(!app.accept_reply(RequestSlot::OrderDetail, id));
    }

    #[test]
    fn pop_to_root_clears_editor() {
        let mut app = App::new("http://localhost:3000", None);
        app.push(Screen::OrderDetail(4));
        app.push(Screen::EditOrder(EditTarget::Existing(4)));
        app.pop_to_root();
        assert_eq!(app.stack, vec![Screen::Orders]);
        assert!(app.editor.is_none());
        assert!(app.detail.is_none());
    }

    #[test]
    fn fresh_flash_is_kept() {
        let mut app = App::new("http://localhost:3000", None);
        app.show_error("boom");
        app.clear_stale_flash();
        assert_eq!(app.flash.as_ref().map(|f| f.kind), Some(FlashKind::Error));
    }

    #[test]
    fn screen_titles() {
        assert_eq!(Screen::Orders.title(), "My Orders");
        assert_eq!(Screen::OrderDetail(3).title(), "Order 3");
        assert_eq!(
            Screen::EditOrder(EditTarget::New(1)).title(),
            "New Order"
        );
    }
}
