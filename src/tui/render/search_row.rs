use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};

use super::spans_width;

pub const SEARCH_PROMPT: &str = "Пошук: ";
pub const SORT_PROMPT: &str = "Сортування: ";

/// Render the search field on the left and the sort selector on the right
pub fn render_search_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let focused = app.focus == Focus::Search;

    let prompt_color = if focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let mut spans = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(SEARCH_PROMPT, Style::default().fg(prompt_color).bg(bg)),
        Span::styled(
            app.controller.search_field().to_string(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ),
    ];
    if focused {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        )); // ▌ cursor
    }

    let sort = [
        Span::styled(SORT_PROMPT, Style::default().fg(app.theme.dim).bg(bg)),
        Span::styled(
            app.controller.sort_selector().label(),
            Style::default().fg(app.theme.purple).bg(bg),
        ),
        Span::styled(" ", Style::default().bg(bg)),
    ];
    let content_width = spans_width(&spans);
    let sort_width = spans_width(&sort);
    if content_width + sort_width < width {
        let padding = width - content_width - sort_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.extend(sort);
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
