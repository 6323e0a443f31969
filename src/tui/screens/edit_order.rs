//! Order editor screen: catalog quantities, address and totals.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::orders::LineItemPricer;
use crate::tui::app::{App, EditorState, Focus, Mode};
use crate::tui::components::truncate;

/// Column after the quantity field: name (26), price (9), quantity (5)
/// and the separating spaces.
const QUANTITY_END: u16 = 26 + 1 + 9 + 1 + 5;

/// Renders the order editor.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(editor) = app.editor.as_ref() else {
        return;
    };
    let Some(pricer) = editor.pricer.as_ref() else {
        let para = Paragraph::new(Span::styled(
            " Loading catalog...",
            Style::default().fg(Color::DarkGray),
        ))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(para, area);
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_catalog(frame, layout[0], app, editor, pricer);
    render_summary(frame, layout[1], app, editor, pricer);
}

fn render_catalog(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    editor: &EditorState,
    pricer: &LineItemPricer,
) {
    let editing = app.mode == Mode::Insert && app.focus == Focus::Quantity;
    let title = match &editor.restaurant {
        Some(r) => format!(" {} ", r.name),
        None => " Catalog ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if editing {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Cyan)
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("{:<26} {:>9} {:>5} {:>10}", "Product", "Price", "Qty", "Line"),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let visible = inner.height.saturating_sub(1) as usize;
    let skip = (editor.selected + 1).saturating_sub(visible.max(1));

    for (i, product) in pricer
        .products()
        .iter()
        .enumerate()
        .skip(skip)
        .take(visible)
    {
        let is_selected = i == editor.selected;
        let quantity = if is_selected {
            editor.quantity_input.as_str().to_string()
        } else {
            match pricer.quantity(product.id) {
                0 => String::new(),
                n => n.to_string(),
            }
        };

        let mut style = if is_selected {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        if !product.availability {
            style = style.add_modifier(Modifier::DIM);
        }

        lines.push(Line::from(Span::styled(
            format!(
                "{:<26} {:>9.2} {:>5} {:>10.2}",
                truncate(&product.name, 26),
                product.price,
                truncate(&quantity, 5),
                pricer.line_price(product.id)
            ),
            style,
        )));

        if is_selected && editing {
            // Just past the right-aligned quantity column.
            let x = inner.x + QUANTITY_END;
            let y = inner.y + 1 + (i - skip) as u16;
            frame.set_cursor_position(Position::new(x.min(inner.right().saturating_sub(1)), y));
        }
    }

    let para = Paragraph::new(lines);
    frame.render_widget(para, inner);
}

fn render_summary(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    editor: &EditorState,
    pricer: &LineItemPricer,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Address
            Constraint::Length(5), // Totals
            Constraint::Min(3),    // Errors
        ])
        .split(area);

    // Address
    let editing = app.mode == Mode::Insert && app.focus == Focus::Address;
    let block = Block::default()
        .title(" Address ")
        .borders(Borders::ALL)
        .border_style(if editing {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        });
    let inner = block.inner(layout[0]);
    let para = Paragraph::new(editor.address.as_str()).block(block);
    frame.render_widget(para, layout[0]);
    if editing {
        let before: String = editor
            .address
            .as_str()
            .chars()
            .take(editor.address.cursor())
            .collect();
        let x = inner.x + before.width() as u16;
        frame.set_cursor_position(Position::new(x.min(inner.right().saturating_sub(1)), inner.y));
    }

    // Totals
    let shipping = editor.shipping_costs();
    let label = Style::default().fg(Color::DarkGray);
    let totals = vec![
        Line::from(vec![
            Span::styled(format!("{:<10}", "Subtotal"), label),
            Span::raw(format!("{:>10.2}", pricer.subtotal())),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<10}", "Shipping"), label),
            Span::raw(format!("{:>10.2}", shipping)),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<10}", "Total"), label),
            Span::styled(
                format!("{:>10.2}", pricer.total_with_shipping(shipping)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    let para = Paragraph::new(totals).block(
        Block::default()
            .title(" Totals ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(para, layout[1]);

    // Errors from the last submit
    let errors: Vec<Line> = editor
        .backend_errors
        .iter()
        .map(|e| Line::from(Span::styled(format!("• {e}"), Style::default().fg(Color::Red))))
        .collect();
    let para = Paragraph::new(errors)
        .wrap(ratatui::widgets::Wrap { trim: true })
        .block(
            Block::default()
                .title(" Errors ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(para, layout[2]);
}
