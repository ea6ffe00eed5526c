use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};

use super::spans_width;

/// Key hints for the focused widget
fn hint(focus: Focus) -> &'static str {
    match focus {
        Focus::Categories => "\u{2190}\u{2192} move  Enter select  / search  s sort  q quit",
        Focus::Search => "Enter search  Esc done  Tab next",
        Focus::Results => "j/k scroll  / search  s sort  q quit",
    }
}

/// Render the status row (bottom of screen): count on the left, hints on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            app.surface().count.clone(),
            Style::default().fg(app.theme.text).bg(bg),
        ),
    ];

    if app.show_key_hints {
        let hint = hint(app.focus);
        let content_width = spans_width(&spans);
        let hint_width = spans_width(&[Span::raw(hint)]) + 1;
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
