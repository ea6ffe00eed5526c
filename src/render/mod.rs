//! Projection of a result list and category set into a display document.
//!
//! The builders here are pure; a [`Surface`] receives the finished pieces
//! and decides how to show them.

pub mod markup;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Article, ViewState};
use crate::ops::highlight::{Segment, highlight};
use crate::ops::pipeline;

pub const EMPTY_PLACEHOLDER: &str = "Нічого не знайдено.";
pub const COUNT_LABEL: &str = "Кількість публікацій";
pub const CATEGORY_LABEL: &str = "Категорія";
pub const AUTHOR_LABEL: &str = "Автор";
pub const DATE_LABEL: &str = "Дата";
pub const TAGS_LABEL: &str = "Теги";

/// One rendered article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostBlock {
    pub title: Vec<Segment>,
    pub content: String,
    pub category: String,
    pub author: String,
    /// Display date (DD.MM.YYYY), or the raw string if it does not parse
    pub date: String,
    /// Tags with the `#` prefix
    pub tags: Vec<String>,
}

impl PostBlock {
    /// "Категорія: … | Автор: … | Дата: …"
    pub fn meta_line(&self) -> String {
        format!(
            "{CATEGORY_LABEL}: {} | {AUTHOR_LABEL}: {} | {DATE_LABEL}: {}",
            self.category, self.author, self.date
        )
    }

    /// Title text without highlight boundaries
    pub fn title_text(&self) -> String {
        self.title.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Contents of the result list target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "posts", rename_all = "snake_case")]
pub enum ResultsDocument {
    /// Nothing matched; show the placeholder instead of a list
    Empty,
    Posts(Vec<PostBlock>),
}

impl ResultsDocument {
    pub fn posts(&self) -> &[PostBlock] {
        match self {
            ResultsDocument::Empty => &[],
            ResultsDocument::Posts(posts) => posts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryButton {
    pub label: String,
    pub pressed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryBar {
    pub buttons: Vec<CategoryButton>,
}

impl CategoryBar {
    /// Index of the pressed button, if any
    pub fn active_index(&self) -> Option<usize> {
        self.buttons.iter().position(|b| b.pressed)
    }
}

/// Display target with three insertion points: result list, count, and
/// category bar.
pub trait Surface {
    fn show_results(&mut self, results: &ResultsDocument);
    fn show_count(&mut self, text: &str);
    fn show_category_bar(&mut self, bar: &CategoryBar);
}

/// Format a date the way the "uk-UA" locale displays it
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn count_text(count: usize) -> String {
    format!("{COUNT_LABEL}: {count}")
}

pub fn post_block(article: &Article, query: &str) -> PostBlock {
    PostBlock {
        title: highlight(&article.title, query),
        content: article.content.clone(),
        category: article.category.clone(),
        author: article.author.clone(),
        date: article
            .published_on()
            .map(format_date)
            .unwrap_or_else(|| article.date.clone()),
        tags: article.tags.iter().map(|t| format!("#{t}")).collect(),
    }
}

pub fn results_document(list: &[&Article], state: &ViewState) -> ResultsDocument {
    if list.is_empty() {
        return ResultsDocument::Empty;
    }
    ResultsDocument::Posts(list.iter().map(|a| post_block(a, &state.query)).collect())
}

/// One button per category; the one equal to the current category is pressed.
pub fn category_bar(categories: &[String], state: &ViewState) -> CategoryBar {
    CategoryBar {
        buttons: categories
            .iter()
            .map(|c| CategoryButton {
                label: c.clone(),
                pressed: *c == state.category,
            })
            .collect(),
    }
}

/// Render the result list and the count indicator
pub fn render_results(surface: &mut impl Surface, list: &[&Article], state: &ViewState) {
    surface.show_results(&results_document(list, state));
    surface.show_count(&count_text(pipeline::count(list)));
}

pub fn render_category_bar(surface: &mut impl Surface, categories: &[String], state: &ViewState) {
    surface.show_category_bar(&category_bar(categories, state));
}
