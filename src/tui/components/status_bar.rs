//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::truncate;
use crate::tui::app::{App, FlashKind, Mode};
use crate::tui::request::RequestSlot;

const SLOTS: [(RequestSlot, &str); 5] = [
    (RequestSlot::OrderList, "orders"),
    (RequestSlot::OrderDetail, "order"),
    (RequestSlot::EditorOrder, "order"),
    (RequestSlot::EditorCatalog, "catalog"),
    (RequestSlot::Mutation, "saving"),
];

/// Renders the status bar: login state, pending requests and the flash
/// message or confirmation prompt.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let auth_label = if app.is_logged_in() {
        Span::styled(" Logged in ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" Not logged in ", Style::default().fg(Color::Yellow))
    };

    let loading: Vec<&str> = SLOTS
        .iter()
        .filter(|(slot, _)| app.requests.is_pending(*slot))
        .map(|(_, label)| *label)
        .collect();
    let loading_span = if loading.is_empty() {
        Span::raw("")
    } else {
        Span::styled(
            format!(" loading {} ", loading.join(", ")),
            Style::default().fg(Color::Yellow),
        )
    };

    let mode_span = match app.mode {
        Mode::Normal => Span::raw(""),
        Mode::Insert => Span::styled(" INSERT ", Style::default().fg(Color::Black).bg(Color::Green)),
        Mode::Confirm => Span::styled(" CONFIRM ", Style::default().fg(Color::Black).bg(Color::Yellow)),
    };

    let room = (area.width as usize).saturating_sub(40);
    let message_span = if let Some(ref confirmation) = app.confirmation {
        Span::styled(
            format!(" {} ", truncate(&confirmation.prompt(), room)),
            Style::default().fg(Color::Yellow),
        )
    } else if let Some(ref flash) = app.flash {
        let color = match flash.kind {
            FlashKind::Success => Color::Green,
            FlashKind::Error => Color::Red,
        };
        Span::styled(
            format!(" {} ", truncate(&flash.message, room)),
            Style::default().fg(color),
        )
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![
        mode_span,
        auth_label,
        Span::raw("│"),
        loading_span,
        Span::raw("│"),
        message_span,
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
