//! Terminal User Interface for ordertab.
//!
//! Provides a Ratatui-based TUI for listing a customer's orders, inspecting
//! one, and editing or removing pending orders.

pub mod app;
pub mod components;
pub mod dispatch;
pub mod event;
pub mod input;
pub mod request;
pub mod screens;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use dispatch::Dispatcher;
pub use event::{Action, Event, Message, start, update};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
