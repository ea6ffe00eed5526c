use std::borrow::Cow;
use std::fmt::Write;

use super::{
    CategoryBar, EMPTY_PLACEHOLDER, PostBlock, ResultsDocument, Surface, TAGS_LABEL,
};

/// Surface that renders each target to an HTML fragment.
///
/// Text is escaped; article content is inserted as-is since articles are
/// trusted static data that may already carry entities.
#[derive(Debug, Clone, Default)]
pub struct HtmlSurface {
    pub posts: String,
    pub count: String,
    pub category_buttons: String,
}

impl HtmlSurface {
    /// All three fragments wrapped in their container elements
    pub fn page(&self) -> String {
        format!(
            "<nav id=\"category-buttons\">{}</nav>\n<p id=\"count\">{}</p>\n<section id=\"blog-posts\">{}</section>\n",
            self.category_buttons, self.count, self.posts
        )
    }
}

impl Surface for HtmlSurface {
    fn show_results(&mut self, results: &ResultsDocument) {
        self.posts = match results {
            ResultsDocument::Empty => format!("<p>{EMPTY_PLACEHOLDER}</p>"),
            ResultsDocument::Posts(posts) => posts.iter().map(post_html).collect(),
        };
    }

    fn show_count(&mut self, text: &str) {
        self.count = escape(text);
    }

    fn show_category_bar(&mut self, bar: &CategoryBar) {
        self.category_buttons = bar
            .buttons
            .iter()
            .map(|b| {
                let label = escape(&b.label);
                format!(
                    "<button data-category=\"{label}\" aria-pressed=\"{}\">{label}</button>",
                    b.pressed
                )
            })
            .collect();
    }
}

fn post_html(post: &PostBlock) -> String {
    let mut title = String::new();
    for seg in &post.title {
        if seg.marked {
            let _ = write!(title, "<mark>{}</mark>", escape(&seg.text));
        } else {
            title.push_str(&escape(&seg.text));
        }
    }
    let tags = post
        .tags
        .iter()
        .map(|t| format!("<span class=\"tag\">{}</span>", escape(t)))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "<article class=\"post\"><h2>{title}</h2><p>{}</p><p><small>{}</small></p><p>{TAGS_LABEL}: {tags}</p></article>",
        post.content,
        escape(&post.meta_line()),
    )
}

/// Escape text for element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode the entities `escape` produces, for surfaces that show plain text.
///
/// Unknown entities are left as written.
pub fn unescape(text: &str) -> Cow<'_, str> {
    const ENTITIES: [(&str, char); 5] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#39;", '\''),
    ];
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, c)) => {
                out.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
