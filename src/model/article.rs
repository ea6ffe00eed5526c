use chrono::{DateTime, NaiveDate};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::view_state::ALL_CATEGORIES;

/// A single blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub author: String,
    /// ISO date as stored ("2025-10-10"); parsed on demand
    pub date: String,
    pub category: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Article {
    /// The publication date, or `None` if the stored string does not parse.
    ///
    /// Accepts a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp.
    pub fn published_on(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }
}

/// Read-only collection of articles, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ArticleStore {
    articles: Vec<Article>,
}

impl ArticleStore {
    pub fn new(articles: Vec<Article>) -> Self {
        ArticleStore { articles }
    }

    pub fn all(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Category set: the "all" sentinel first, then each distinct category
    /// in order of first occurrence.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        seen.insert(ALL_CATEGORIES);
        for article in &self.articles {
            seen.insert(article.category.as_str());
        }
        seen.into_iter().map(str::to_string).collect()
    }
}
