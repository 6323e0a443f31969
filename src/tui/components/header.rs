//! Breadcrumb header component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::truncate;
use crate::tui::app::App;

/// Renders the screen stack as a breadcrumb, current screen highlighted.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans: Vec<Span> = Vec::new();
    let last = app.stack.len().saturating_sub(1);

    for (i, screen) in app.stack.iter().enumerate() {
        let is_current = i == last;

        let style = if is_current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        spans.push(Span::styled(format!(" {} ", screen.title()), style));
        if !is_current {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
    }

    if let Some(user) = &app.user {
        let used: usize = spans.iter().map(|s| s.width()).sum();
        let room = (area.width as usize).saturating_sub(used + 1);
        let name = truncate(&user.display_name(), room);
        let pad = room.saturating_sub(unicode_width::UnicodeWidthStr::width(name.as_str()));
        spans.push(Span::raw(" ".repeat(pad + 1)));
        spans.push(Span::styled(name, Style::default().fg(Color::Cyan)));
    }

    let line = Line::from(spans);
    let para = Paragraph::new(line);
    frame.render_widget(para, area);
}
