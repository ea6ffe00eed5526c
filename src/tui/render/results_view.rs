use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::render::markup::unescape;
use crate::render::{EMPTY_PLACEHOLDER, PostBlock, ResultsDocument};
use crate::tui::app::App;
use crate::util::unicode;

use super::push_segment_spans;

/// Render the result list starting at the scroll offset.
///
/// Scrolling is by whole post; posts are added until the wrapped rows fill
/// the area.
pub fn render_results_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let lines = match &app.surface().results {
        ResultsDocument::Empty => vec![Line::from(vec![
            Span::styled(" ", Style::default().bg(bg)),
            Span::styled(EMPTY_PLACEHOLDER, Style::default().fg(app.theme.dim).bg(bg)),
        ])],
        ResultsDocument::Posts(posts) => {
            let mut lines = Vec::new();
            for post in posts.iter().skip(app.scroll) {
                if lines.len() >= area.height as usize {
                    break;
                }
                push_post_lines(&mut lines, app, post, area.width as usize);
            }
            lines
        }
    };

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Title, wrapped content, wrapped meta line, optional tag line, then a
/// blank spacer
fn push_post_lines<'a>(lines: &mut Vec<Line<'a>>, app: &App, post: &PostBlock, width: usize) {
    let bg = app.theme.background;
    let inner = width.saturating_sub(2);
    let indent = || Span::styled(" ", Style::default().bg(bg));
    let wrapped = |text: &str, style: Style| -> Vec<Line<'a>> {
        unicode::wrap_to_width(text, inner)
            .into_iter()
            .map(|row| Line::from(vec![indent(), Span::styled(row, style)]))
            .collect()
    };

    let mut title = vec![indent()];
    push_segment_spans(
        &mut title,
        &post.title,
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
        Style::default()
            .fg(app.theme.search_match_fg)
            .bg(app.theme.search_match_bg)
            .add_modifier(Modifier::BOLD),
    );
    lines.push(Line::from(title));

    lines.extend(wrapped(
        &unescape(&post.content),
        Style::default().fg(app.theme.text).bg(bg),
    ));
    lines.extend(wrapped(
        &post.meta_line(),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    if !post.tags.is_empty() {
        let mut tags = vec![indent()];
        for (i, tag) in post.tags.iter().enumerate() {
            if i > 0 {
                tags.push(Span::styled(" ", Style::default().bg(bg)));
            }
            tags.push(Span::styled(
                tag.clone(),
                Style::default().fg(app.theme.tag_color(tag)).bg(bg),
            ));
        }
        lines.push(Line::from(tags));
    }

    lines.push(Line::from(""));
}
