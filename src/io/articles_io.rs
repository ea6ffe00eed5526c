use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::model::{Article, ArticleStore};

const BUILTIN_ARTICLES: &str = include_str!("../data/articles.json");

/// Error type for loading article files
#[derive(Debug, thiserror::Error)]
pub enum ArticlesError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse articles: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("article {index} is invalid: {reason}")]
    Invalid { index: usize, reason: String },
}

/// The articles shipped with the widget
pub fn builtin_articles() -> ArticleStore {
    // The embedded file is covered by tests; an empty store is the safe fallback.
    parse_articles(BUILTIN_ARTICLES).unwrap_or_else(|e| {
        warn!(error = %e, "built-in articles failed to load");
        ArticleStore::default()
    })
}

/// Load articles from `path`, or the built-in set when no path is given.
pub fn load_articles(path: Option<&Path>) -> Result<ArticleStore, ArticlesError> {
    let Some(path) = path else {
        return Ok(builtin_articles());
    };
    let text = fs::read_to_string(path).map_err(|source| ArticlesError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_articles(&text)
}

/// Parse a JSON array of articles.
///
/// Empty titles are rejected. Unparsable dates are kept (they sort last) but
/// logged.
pub fn parse_articles(json: &str) -> Result<ArticleStore, ArticlesError> {
    let articles: Vec<Article> = serde_json::from_str(json)?;
    for (index, article) in articles.iter().enumerate() {
        if article.title.trim().is_empty() {
            return Err(ArticlesError::Invalid {
                index,
                reason: "title is empty".into(),
            });
        }
        if article.published_on().is_none() {
            warn!(index, title = %article.title, date = %article.date, "article date does not parse");
        }
    }
    Ok(ArticleStore::new(articles))
}
