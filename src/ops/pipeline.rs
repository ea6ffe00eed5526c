use std::cmp::Ordering;

use tracing::debug;

use crate::model::{Article, SortMode, ViewState};
use crate::ops::collate;

/// Run the filter → search → sort pipeline over `articles`.
///
/// Returns a new list borrowing from the input; the input is untouched.
pub fn run<'a>(articles: &'a [Article], state: &ViewState) -> Vec<&'a Article> {
    let category = (!state.is_all_categories()).then(|| state.category.to_lowercase());
    let query = state.query.to_lowercase();

    let mut list: Vec<&Article> = articles
        .iter()
        .filter(|a| {
            category
                .as_deref()
                .is_none_or(|c| a.category.to_lowercase() == c)
        })
        .filter(|a| query.is_empty() || a.title.to_lowercase().contains(&query))
        .collect();
    sort_articles(&mut list, state.sort_mode);

    debug!(
        category = %state.category,
        query = %state.query,
        sort = %state.sort_mode,
        total = articles.len(),
        shown = list.len(),
        "pipeline run"
    );
    list
}

/// Stable sort by the given mode
pub fn sort_articles(list: &mut [&Article], mode: SortMode) {
    let cmp = comparator(mode);
    list.sort_by(|a, b| cmp(a, b));
}

/// The comparator for a sort mode
pub fn comparator(mode: SortMode) -> fn(&Article, &Article) -> Ordering {
    match mode {
        SortMode::Newest => newest_first,
        SortMode::Oldest => oldest_first,
        SortMode::Title => by_title,
    }
}

/// Descending by date. Unparsable dates go last.
pub fn newest_first(a: &Article, b: &Article) -> Ordering {
    by_date(a, b, |x, y| y.cmp(x))
}

/// Ascending by date. Unparsable dates go last.
pub fn oldest_first(a: &Article, b: &Article) -> Ordering {
    by_date(a, b, |x, y| x.cmp(y))
}

pub fn by_title(a: &Article, b: &Article) -> Ordering {
    collate::compare(&a.title, &b.title)
}

fn by_date(
    a: &Article,
    b: &Article,
    order: impl Fn(&chrono::NaiveDate, &chrono::NaiveDate) -> Ordering,
) -> Ordering {
    match (a.published_on(), b.published_on()) {
        (Some(x), Some(y)) => order(&x, &y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Articles whose category equals `category`, ignoring case. Exact match,
/// not substring; the "all" sentinel gets no special treatment.
pub fn filter_by_category<'a>(articles: &'a [Article], category: &str) -> Vec<&'a Article> {
    let wanted = category.to_lowercase();
    articles
        .iter()
        .filter(|a| a.category.to_lowercase() == wanted)
        .collect()
}

/// First article (in store order) whose title contains `query`, ignoring case.
/// An empty query matches the first article.
pub fn find_by_title<'a>(articles: &'a [Article], query: &str) -> Option<&'a Article> {
    let query = query.to_lowercase();
    articles
        .iter()
        .find(|a| a.title.to_lowercase().contains(&query))
}

pub fn count(list: &[&Article]) -> usize {
    list.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::articles_io::builtin_articles;
    use pretty_assertions::assert_eq;

    fn article(title: &str, date: &str, category: &str) -> Article {
        Article {
            title: title.into(),
            author: "A".into(),
            date: date.into(),
            category: category.into(),
            content: String::new(),
            tags: vec![],
        }
    }

    fn titles(list: &[&Article]) -> Vec<String> {
        list.iter().map(|a| a.title.clone()).collect()
    }

    fn state(category: &str, query: &str, sort_mode: SortMode) -> ViewState {
        ViewState {
            category: category.into(),
            query: query.into(),
            sort_mode,
        }
    }

    #[test]
    fn default_state_shows_everything_newest_first() {
        let store = builtin_articles();
        let list = run(store.all(), &ViewState::default());
        assert_eq!(
            titles(&list),
            vec![
                "Методи масивів у JavaScript",
                "Основи JavaScript",
                "Гнучкі макети з Flexbox",
                "Семантика HTML5",
            ]
        );
    }

    #[test]
    fn oldest_first_reverses_newest_when_dates_distinct() {
        let store = builtin_articles();
        let mut newest = titles(&run(store.all(), &state("Усі", "", SortMode::Newest)));
        let oldest = titles(&run(store.all(), &state("Усі", "", SortMode::Oldest)));
        newest.reverse();
        assert_eq!(newest, oldest);
    }

    #[test]
    fn title_sort_uses_ukrainian_order() {
        let store = builtin_articles();
        let list = run(store.all(), &state("Усі", "", SortMode::Title));
        assert_eq!(
            titles(&list),
            vec![
                "Гнучкі макети з Flexbox",
                "Методи масивів у JavaScript",
                "Основи JavaScript",
                "Семантика HTML5",
            ]
        );
    }

    #[test]
    fn category_filter_is_exact_and_case_insensitive() {
        let articles = vec![
            article("a", "2025-01-01", "Java"),
            article("b", "2025-01-02", "JavaScript"),
            article("c", "2025-01-03", "java"),
        ];
        let list = run(&articles, &state("Java", "", SortMode::Oldest));
        assert_eq!(titles(&list), vec!["a", "c"]);

        let list = run(&articles, &state("JAVASCRIPT", "", SortMode::Oldest));
        assert_eq!(titles(&list), vec!["b"]);
    }

    #[test]
    fn title_search_is_case_insensitive_substring() {
        let store = builtin_articles();
        let list = run(store.all(), &state("Усі", "flexbox", SortMode::Newest));
        assert_eq!(titles(&list), vec!["Гнучкі макети з Flexbox"]);

        let list = run(store.all(), &state("Усі", "JAVASCRIPT", SortMode::Title));
        assert_eq!(
            titles(&list),
            vec!["Методи масивів у JavaScript", "Основи JavaScript"]
        );
    }

    #[test]
    fn category_and_query_combine() {
        let store = builtin_articles();
        let list = run(store.all(), &state("JavaScript", "основи", SortMode::Newest));
        assert_eq!(titles(&list), vec!["Основи JavaScript"]);
    }

    #[test]
    fn no_match_is_empty_list() {
        let store = builtin_articles();
        let list = run(store.all(), &state("HTML", "zzznotfound", SortMode::Newest));
        assert!(list.is_empty());
        assert_eq!(count(&list), 0);
    }

    #[test]
    fn unknown_category_is_empty_list() {
        let store = builtin_articles();
        assert!(run(store.all(), &state("Rust", "", SortMode::Newest)).is_empty());
    }

    #[test]
    fn equal_dates_keep_original_order() {
        let articles = vec![
            article("first", "2025-01-01", "X"),
            article("second", "2025-01-01", "X"),
            article("third", "2025-01-02", "X"),
        ];
        let newest = run(&articles, &state("Усі", "", SortMode::Newest));
        assert_eq!(titles(&newest), vec!["third", "first", "second"]);
        let oldest = run(&articles, &state("Усі", "", SortMode::Oldest));
        assert_eq!(titles(&oldest), vec!["first", "second", "third"]);
    }

    #[test]
    fn sorting_twice_is_identical() {
        let store = builtin_articles();
        for mode in SortMode::ALL {
            let s = state("Усі", "", mode);
            assert_eq!(titles(&run(store.all(), &s)), titles(&run(store.all(), &s)));
        }
    }

    #[test]
    fn unparsable_dates_sort_last_in_both_orders() {
        let articles = vec![
            article("broken", "not a date", "X"),
            article("old", "2020-01-01", "X"),
            article("new", "2025-01-01", "X"),
        ];
        let newest = run(&articles, &state("Усі", "", SortMode::Newest));
        assert_eq!(titles(&newest), vec!["new", "old", "broken"]);
        let oldest = run(&articles, &state("Усі", "", SortMode::Oldest));
        assert_eq!(titles(&oldest), vec!["old", "new", "broken"]);
    }

    #[test]
    fn run_does_not_touch_input_order() {
        let store = builtin_articles();
        let before = store.all().to_vec();
        let _ = run(store.all(), &state("Усі", "", SortMode::Title));
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn filter_by_category_helper() {
        let store = builtin_articles();
        assert_eq!(filter_by_category(store.all(), "javascript").len(), 2);
        assert_eq!(filter_by_category(store.all(), "HTML").len(), 1);
        assert!(filter_by_category(store.all(), "Java").is_empty());
        assert!(filter_by_category(store.all(), "Усі").is_empty());
    }

    #[test]
    fn find_by_title_returns_first_match_or_none() {
        let store = builtin_articles();
        let found = find_by_title(store.all(), "javascript").unwrap();
        assert_eq!(found.title, "Основи JavaScript");
        assert!(find_by_title(store.all(), "zzz").is_none());
        assert_eq!(
            find_by_title(store.all(), "").map(|a| a.title.as_str()),
            Some("Основи JavaScript")
        );
    }
}
