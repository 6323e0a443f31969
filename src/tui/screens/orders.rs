//! Orders screen: confirmed and pending sections.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::models::Order;
use crate::tui::app::App;
use crate::tui::components::truncate;
use crate::tui::event::NO_ORDERS_TEXT;

/// Renders the orders screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(buckets) = app.orders.buckets.as_ref().filter(|b| !b.is_empty()) else {
        let block = Block::default()
            .title(" My Orders ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let para = Paragraph::new(Span::styled(
            NO_ORDERS_TEXT,
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(para, area);
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Rows are numbered across both sections, confirmed first.
    let offset = buckets.confirmed.len();
    render_section(
        frame,
        sections[0],
        &format!(" Confirmed ({}) ", buckets.confirmed.len()),
        &buckets.confirmed,
        app.orders.selected,
    );
    render_section(
        frame,
        sections[1],
        &format!(" Pending ({}) ", buckets.pending.len()),
        &buckets.pending,
        app.orders.selected.wrapping_sub(offset),
    );
}

/// Renders one bucket. `selected` is relative to this bucket and may be out
/// of range when the selection is in the other one.
fn render_section(frame: &mut Frame, area: Rect, title: &str, orders: &[Order], selected: usize) {
    let has_selection = selected < orders.len();
    let border_style = if has_selection {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    // Header
    lines.push(Line::from(Span::styled(
        format!(
            "{:<6} {:<24} {:<20} {:>10} {:>9} {:<10}",
            "ID", "Created", "Restaurant", "Price", "Shipping", "Status"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    if orders.is_empty() {
        lines.push(Line::from(Span::styled(
            NO_ORDERS_TEXT,
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Keep the selected row visible.
    let visible = inner.height.saturating_sub(1) as usize;
    let skip = if has_selection && visible > 0 {
        (selected + 1).saturating_sub(visible)
    } else {
        0
    };

    for (i, order) in orders.iter().enumerate().skip(skip).take(visible) {
        let restaurant = order
            .restaurant
            .as_ref()
            .map(|r| truncate(&r.name, 20))
            .unwrap_or_default();

        let style = if i == selected {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };

        lines.push(Line::from(Span::styled(
            format!(
                "{:<6} {:<24} {:<20} {:>10.2} {:>9.2} {:<10}",
                order.id,
                truncate(&order.created_at, 24),
                restaurant,
                order.price,
                order.shipping_costs,
                order.status
            ),
            style,
        )));
    }

    let para = Paragraph::new(lines);
    frame.render_widget(para, inner);
}
