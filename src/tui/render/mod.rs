pub mod category_bar;
pub mod results_view;
pub mod search_row;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;

use crate::ops::highlight::Segment;
use crate::util::unicode;

use super::app::App;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: category bar (2 rows) | search row | results | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // category buttons + separator
            Constraint::Length(1), // search field + sort selector
            Constraint::Min(1),    // result list
            Constraint::Length(1), // status row
        ])
        .split(area);

    category_bar::render_category_bar(frame, app, chunks[0]);
    search_row::render_search_row(frame, app, chunks[1]);
    results_view::render_results_view(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);
}

/// Push one span per segment, styling marked segments with `highlight_style`.
pub(super) fn push_segment_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    segments: &[Segment],
    base_style: Style,
    highlight_style: Style,
) {
    for segment in segments {
        let style = if segment.marked {
            highlight_style
        } else {
            base_style
        };
        spans.push(Span::styled(segment.text.clone(), style));
    }
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}
