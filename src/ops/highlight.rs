use std::ops::Range;

use regex::Regex;
use serde::Serialize;

/// A run of text, marked when it is an occurrence of the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub marked: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Segment {
            text: text.into(),
            marked: false,
        }
    }

    pub fn marked(text: impl Into<String>) -> Self {
        Segment {
            text: text.into(),
            marked: true,
        }
    }
}

/// Case-insensitive matcher for `query` taken literally. `None` for an empty
/// query.
pub fn query_regex(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(query))).ok()
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
pub fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Split `text` at every case-insensitive occurrence of `query`.
///
/// With an empty query (or no occurrence) the result is one unmarked segment
/// holding the whole text.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    let matches = match query_regex(query) {
        Some(re) => find_matches(&re, text),
        None => Vec::new(),
    };
    if matches.is_empty() {
        return vec![Segment::plain(text)];
    }

    let mut segments = Vec::new();
    let mut last_end = 0;
    for m in matches {
        if m.start > last_end {
            segments.push(Segment::plain(&text[last_end..m.start]));
        }
        segments.push(Segment::marked(&text[m.clone()]));
        last_end = m.end;
    }
    if last_end < text.len() {
        segments.push(Segment::plain(&text[last_end..]));
    }
    segments
}
