use serde::Serialize;

use crate::model::{Article, ViewState};
use crate::ops::highlight::{Segment, highlight};
use crate::render::markup::unescape;
use crate::render::{CategoryBar, EMPTY_PLACEHOLDER, PostBlock, ResultsDocument};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ArticleJson {
    pub title: String,
    pub author: String,
    pub date: String,
    pub category: String,
    pub content: String,
    pub tags: Vec<String>,
}

#[derive(Serialize)]
pub struct PostJson {
    #[serde(flatten)]
    pub article: ArticleJson,
    /// Title split at query occurrences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_segments: Option<Vec<Segment>>,
}

#[derive(Serialize)]
pub struct ListJson {
    pub state: ViewState,
    pub count: usize,
    pub posts: Vec<PostJson>,
}

#[derive(Serialize)]
pub struct CategoryJson {
    pub name: String,
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

pub fn article_to_json(article: &Article) -> ArticleJson {
    ArticleJson {
        title: article.title.clone(),
        author: article.author.clone(),
        date: article.date.clone(),
        category: article.category.clone(),
        content: article.content.clone(),
        tags: article.tags.clone(),
    }
}

/// Segments are only included when the query actually splits the title
pub fn post_to_json(article: &Article, query: &str) -> PostJson {
    let segments = highlight(&article.title, query);
    let title_segments = segments.iter().any(|s| s.marked).then_some(segments);
    PostJson {
        article: article_to_json(article),
        title_segments,
    }
}

pub fn list_to_json(list: &[&Article], state: &ViewState) -> ListJson {
    ListJson {
        state: state.clone(),
        count: list.len(),
        posts: list.iter().map(|a| post_to_json(a, &state.query)).collect(),
    }
}

pub fn categories_to_json(bar: &CategoryBar) -> Vec<CategoryJson> {
    bar.buttons
        .iter()
        .map(|b| CategoryJson {
            name: b.label.clone(),
            active: b.pressed,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Plain text formatting
// ---------------------------------------------------------------------------

/// Title, then indented content, meta line and tags
pub fn format_post(post: &PostBlock) -> String {
    let mut out = post.title_text();
    out.push_str("\n  ");
    out.push_str(&unescape(&post.content));
    out.push_str("\n  ");
    out.push_str(&post.meta_line());
    if !post.tags.is_empty() {
        out.push_str("\n  ");
        out.push_str(&post.tags.join(" "));
    }
    out
}

pub fn format_results(doc: &ResultsDocument) -> String {
    match doc {
        ResultsDocument::Empty => EMPTY_PLACEHOLDER.to_string(),
        ResultsDocument::Posts(posts) => posts
            .iter()
            .map(format_post)
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

/// One category per line, the active one marked with `*`
pub fn format_categories(bar: &CategoryBar) -> String {
    bar.buttons
        .iter()
        .map(|b| {
            let marker = if b.pressed { '*' } else { ' ' };
            format!("{marker} {}", b.label)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_state(state: &ViewState) -> String {
    format!(
        "category: {}\nquery: {}\nsort: {} ({})",
        state.category,
        state.query,
        state.sort_mode.token(),
        state.sort_mode.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::articles_io::builtin_articles;
    use crate::model::SortMode;
    use crate::ops::pipeline;
    use crate::render::{category_bar, post_block};
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn post_text_layout() {
        let store = builtin_articles();
        let text = format_post(&post_block(&store.all()[2], ""));
        assert_snapshot!(text, @r"
        Семантика HTML5
          Навіщо використовувати <header>, <main>, <article> та інші семантичні теги.
          Категорія: HTML | Автор: Iryna Chorna | Дата: 05.10.2025
          #HTML #Semantic
        ");
    }

    #[test]
    fn empty_results_text_is_placeholder() {
        assert_eq!(format_results(&ResultsDocument::Empty), "Нічого не знайдено.");
    }

    #[test]
    fn categories_mark_active() {
        let store = builtin_articles();
        let state = ViewState {
            category: "HTML".into(),
            ..ViewState::default()
        };
        let bar = category_bar(&store.categories(), &state);
        assert_eq!(
            format_categories(&bar),
            "  Усі\n  JavaScript\n* HTML\n  CSS"
        );
        let json = categories_to_json(&bar);
        assert!(json[2].active);
        assert_eq!(json.iter().filter(|c| c.active).count(), 1);
    }

    #[test]
    fn list_json_shape() {
        let store = builtin_articles();
        let state = ViewState {
            category: "CSS".into(),
            query: "flex".into(),
            sort_mode: SortMode::Title,
        };
        let list = pipeline::run(store.all(), &state);
        let json = serde_json::to_string(&list_to_json(&list, &state)).unwrap();
        assert_snapshot!(json, @r#"{"state":{"category":"CSS","query":"flex","sort":"title"},"count":1,"posts":[{"title":"Гнучкі макети з Flexbox","author":"Dmytro Kovalenko","date":"2025-10-08","category":"CSS","content":"Flexbox допомагає будувати адаптивні макети з мінімумом коду.","tags":["CSS","Flexbox","Layout"],"title_segments":[{"text":"Гнучкі макети з ","marked":false},{"text":"Flex","marked":true},{"text":"box","marked":false}]}]}"#);
    }

    #[test]
    fn segments_omitted_without_match() {
        let store = builtin_articles();
        let json = post_to_json(&store.all()[0], "");
        assert!(json.title_segments.is_none());
    }

    #[test]
    fn state_text() {
        assert_eq!(
            format_state(&ViewState::default()),
            "category: Усі\nquery: \nsort: new (Спочатку нові)"
        );
    }
}
