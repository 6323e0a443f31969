//! Order detail screen: order header and its lines.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::models::{Order, image_url};
use crate::tui::app::App;
use crate::tui::components::truncate;

/// Renders the order detail screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(order) = app.detail.as_ref().and_then(|d| d.order.as_ref()) else {
        let para = Paragraph::new(Span::styled(
            " Loading order...",
            Style::default().fg(Color::DarkGray),
        ))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(para, area);
        return;
    };
    let selected = app.detail.as_ref().map_or(0, |d| d.selected);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(3)])
        .split(area);

    render_summary(frame, layout[0], app, order);
    render_lines(frame, layout[1], order, selected);
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App, order: &Order) {
    let block = Block::default()
        .title(format!(" Order {} ", order.id))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let label = Style::default().fg(Color::DarkGray);
    let field = |name: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{name:<11}"), label),
            Span::raw(value),
        ])
    };

    let restaurant = match &order.restaurant {
        Some(r) => r.name.clone(),
        None => format!("#{}", order.restaurant_id),
    };
    let logo = order
        .restaurant_logo()
        .map(|path| image_url(&app.base_url, path))
        .unwrap_or_else(|| "-".to_string());

    let mut total = vec![
        Span::styled(format!("{:<11}", "Total"), label),
        Span::styled(
            format!("{:.2}", order.computed_total()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if order.has_stale_total() {
        total.push(Span::styled(
            format!("  (service shows {:.2})", order.price),
            Style::default().fg(Color::Yellow),
        ));
    }

    let lines = vec![
        field("Restaurant", restaurant),
        field("Created", order.created_at.clone()),
        field(
            "Started",
            order.started_at.clone().unwrap_or_else(|| "-".to_string()),
        ),
        field("Status", order.status.to_string()),
        field("Address", order.address.clone()),
        field("Shipping", format!("{:.2}", order.shipping_costs)),
        Line::from(total),
        field("Logo", truncate(&logo, area.width.saturating_sub(14) as usize)),
    ];

    let para = Paragraph::new(lines).block(block);
    frame.render_widget(para, area);
}

fn render_lines(frame: &mut Frame, area: Rect, order: &Order, selected: usize) {
    let block = Block::default()
        .title(format!(" Products ({}) ", order.products.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(
            "{:<28} {:>10} {:>5} {:>11}",
            "Product", "Unit", "Qty", "Total"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let visible = inner.height.saturating_sub(1) as usize;
    let skip = (selected + 1).saturating_sub(visible.max(1));

    for (i, line) in order.products.iter().enumerate().skip(skip).take(visible) {
        let style = if i == selected {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{:<28} {:>10.2} {:>5} {:>11.2}",
                truncate(&line.product.name, 28),
                line.unit_price(),
                line.line.quantity,
                line.line_total()
            ),
            style,
        )));
    }

    let para = Paragraph::new(lines);
    frame.render_widget(para, inner);
}
