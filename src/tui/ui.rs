//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use super::app::{App, Mode, Screen};
use super::components::{header, status_bar};
use super::screens::{edit_order, order_detail, orders};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Breadcrumb
            Constraint::Length(1), // Status bar
            Constraint::Min(5),    // Screen content
            Constraint::Length(1), // Keybindings help
        ])
        .split(area);

    header::render(frame, main_layout[0], app);
    status_bar::render(frame, main_layout[1], app);

    match app.current_screen() {
        Screen::Orders => orders::render(frame, main_layout[2], app),
        Screen::OrderDetail(_) => order_detail::render(frame, main_layout[2], app),
        Screen::EditOrder(_) => edit_order::render(frame, main_layout[2], app),
    }

    render_keybindings(frame, main_layout[3], app);
}

fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let help = match (app.mode, app.current_screen()) {
        (Mode::Confirm, _) => "[y]es [n]o",
        (Mode::Insert, _) => "type to edit [Enter/Esc]done",
        (Mode::Normal, Screen::Orders) => {
            "[j/k]move [Enter]detail [e]dit [d]elete [n]ew order [r]efresh [q]uit"
        }
        (Mode::Normal, Screen::OrderDetail(_)) => {
            "[j/k]move [d]elete product [e]dit [r]efresh [Esc]back [q]uit"
        }
        (Mode::Normal, Screen::EditOrder(_)) => {
            "[j/k]move [i]quantity [a]ddress [s]ubmit [Esc]back [q]uit"
        }
    };

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
