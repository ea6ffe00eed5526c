use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category sentinel meaning "no category filter"
pub const ALL_CATEGORIES: &str = "Усі";

/// How the result list is ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortMode {
    /// Newest first
    #[default]
    #[serde(rename = "new")]
    Newest,
    /// Oldest first
    #[serde(rename = "old")]
    Oldest,
    /// Alphabetical by title
    #[serde(rename = "title")]
    Title,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Newest, SortMode::Oldest, SortMode::Title];

    /// Token used by the sort selector and the persisted record
    pub fn token(self) -> &'static str {
        match self {
            SortMode::Newest => "new",
            SortMode::Oldest => "old",
            SortMode::Title => "title",
        }
    }

    /// Label shown in the sort selector
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Newest => "Спочатку нові",
            SortMode::Oldest => "Спочатку старі",
            SortMode::Title => "За назвою",
        }
    }

    /// Next option in selector order (wraps around)
    pub fn next(self) -> Self {
        match self {
            SortMode::Newest => SortMode::Oldest,
            SortMode::Oldest => SortMode::Title,
            SortMode::Title => SortMode::Newest,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode: {0} (expected new, old or title)")]
pub struct ParseSortModeError(pub String);

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.token() == s)
            .ok_or_else(|| ParseSortModeError(s.to_string()))
    }
}

/// The user's current category/search/sort selection.
///
/// Plain data: the controller mutates it and persists it after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub category: String,
    pub query: String,
    #[serde(rename = "sort")]
    pub sort_mode: SortMode,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            category: ALL_CATEGORIES.to_string(),
            query: String::new(),
            sort_mode: SortMode::default(),
        }
    }
}

impl ViewState {
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_sort(&mut self, sort_mode: SortMode) {
        self.sort_mode = sort_mode;
    }

    /// True when no category filter applies
    pub fn is_all_categories(&self) -> bool {
        self.category == ALL_CATEGORIES
    }
}
