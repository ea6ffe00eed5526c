//! Binds user intents to view state changes.
//!
//! Every intent runs one full cycle on the caller's thread: mutate the view
//! state, rerun the pipeline, render, persist. The typed-text path is the
//! exception: it only schedules the cycle, which runs from [`InputController::tick`]
//! once input has been quiet for the debounce window.

pub mod debounce;

use std::time::{Duration, Instant};

use tracing::debug;

use crate::io::kv::KvStore;
use crate::io::state::{STATE_KEY, load_view_state, save_view_state};
use crate::model::{Article, ArticleStore, ParseSortModeError, SortMode, ViewState, WidgetConfig};
use crate::ops::pipeline;
use crate::render::{Surface, render_category_bar, render_results};

use debounce::Debouncer;

/// Called with the query and the best single title match on explicit search
pub type MatchHook = Box<dyn FnMut(&str, Option<&Article>)>;

/// A user action coming from one of the input widgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// A category button was activated
    SelectCategory(String),
    /// The search button was pressed (or Enter in the search field)
    Search,
    /// The search field now holds this text
    InputChanged(String),
    /// The sort selector changed
    ChangeSort(SortMode),
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub state_key: String,
    pub debounce: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        ControllerOptions {
            state_key: STATE_KEY.to_string(),
            debounce: Duration::from_millis(300),
        }
    }
}

impl From<&WidgetConfig> for ControllerOptions {
    fn from(config: &WidgetConfig) -> Self {
        ControllerOptions {
            state_key: config.state_key.clone(),
            debounce: config.debounce(),
        }
    }
}

pub struct InputController<K: KvStore, S: Surface> {
    articles: ArticleStore,
    state: ViewState,
    store: K,
    surface: S,
    state_key: String,
    /// Current text of the search field
    search_field: String,
    /// Current value of the sort selector
    sort_selector: SortMode,
    typing: Debouncer<String>,
    match_hook: Option<MatchHook>,
}

impl<K: KvStore, S: Surface> InputController<K, S> {
    pub fn new(articles: ArticleStore, store: K, surface: S, options: ControllerOptions) -> Self {
        InputController {
            articles,
            state: ViewState::default(),
            store,
            surface,
            state_key: options.state_key,
            search_field: String::new(),
            sort_selector: SortMode::default(),
            typing: Debouncer::new(options.debounce),
            match_hook: None,
        }
    }

    /// Install a hook for the best-match lookup done on explicit search
    pub fn with_match_hook(mut self, hook: impl FnMut(&str, Option<&Article>) + 'static) -> Self {
        self.match_hook = Some(Box::new(hook));
        self
    }

    /// Load the persisted state, prime the widgets, and render once.
    pub fn start(&mut self) {
        self.state = load_view_state(&self.store, &self.state_key);
        self.search_field = self.state.query.clone();
        self.sort_selector = self.state.sort_mode;
        debug!(state = ?self.state, "starting");

        render_category_bar(&mut self.surface, &self.articles.categories(), &self.state);
        self.rerender();
        self.persist();
    }

    pub fn dispatch(&mut self, intent: Intent, now: Instant) {
        match intent {
            Intent::SelectCategory(category) => self.select_category(&category),
            Intent::Search => self.submit_search(),
            Intent::InputChanged(text) => self.input_changed(text, now),
            Intent::ChangeSort(mode) => self.change_sort(mode),
        }
    }

    pub fn select_category(&mut self, category: &str) {
        self.state.set_category(category);
        self.rerender();
        render_category_bar(&mut self.surface, &self.articles.categories(), &self.state);
        self.persist();
    }

    /// Apply the search field text now. Supersedes a pending typed-text cycle.
    pub fn submit_search(&mut self) {
        self.typing.cancel();
        let query = self.search_field.trim().to_string();

        let found = pipeline::find_by_title(self.articles.all(), &query);
        debug!(query = %query, found = ?found.map(|a| a.title.as_str()), "best title match");
        if let Some(hook) = self.match_hook.as_mut() {
            hook(&query, found);
        }

        self.state.set_query(query);
        self.rerender();
        self.persist();
    }

    /// Record new search field text and (re)start the debounce window
    pub fn input_changed(&mut self, text: impl Into<String>, now: Instant) {
        self.search_field = text.into();
        self.typing.schedule(self.search_field.clone(), now);
    }

    pub fn change_sort(&mut self, mode: SortMode) {
        self.sort_selector = mode;
        self.state.set_sort(mode);
        self.rerender();
        self.persist();
    }

    /// Sort selector change carrying a raw token ("new", "old", "title")
    pub fn change_sort_token(&mut self, token: &str) -> Result<(), ParseSortModeError> {
        let mode = token.parse()?;
        self.change_sort(mode);
        Ok(())
    }

    /// Run the debounced typed-text cycle if its window has elapsed.
    /// Returns true if a cycle ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(text) = self.typing.take_due(now) else {
            return false;
        };
        debug!(text = %text, "debounced query applied");
        self.state.set_query(text.trim());
        self.rerender();
        self.persist();
        true
    }

    /// When the pending typed-text cycle is due, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.typing.deadline()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn search_field(&self) -> &str {
        &self.search_field
    }

    pub fn sort_selector(&self) -> SortMode {
        self.sort_selector
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    /// The current result list
    pub fn results(&self) -> Vec<&Article> {
        pipeline::run(self.articles.all(), &self.state)
    }

    fn rerender(&mut self) {
        let list = pipeline::run(self.articles.all(), &self.state);
        render_results(&mut self.surface, &list, &self.state);
    }

    fn persist(&mut self) {
        save_view_state(&mut self.store, &self.state_key, &self.state);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::io::articles_io::builtin_articles;
    use crate::io::kv::{KvError, MemoryStore};
    use crate::render::ResultsDocument;
    use crate::render::testing::RecordingSurface;
    use pretty_assertions::assert_eq;

    const DELAY: Duration = Duration::from_millis(300);

    /// Memory store that counts writes
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: usize,
    }

    impl KvStore for CountingStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
            self.writes += 1;
            self.inner.set(key, value)
        }
    }

    type Controller = InputController<CountingStore, RecordingSurface>;

    fn controller_with(persisted: Option<&str>) -> Controller {
        let mut store = CountingStore::default();
        if let Some(raw) = persisted {
            store.inner.set(STATE_KEY, raw).unwrap();
        }
        let mut c = InputController::new(
            builtin_articles(),
            store,
            RecordingSurface::default(),
            ControllerOptions::default(),
        );
        c.start();
        c
    }

    fn shown_titles(c: &Controller) -> Vec<String> {
        c.surface()
            .results
            .as_ref()
            .unwrap()
            .posts()
            .iter()
            .map(|p| p.title_text())
            .collect()
    }

    fn persisted(c: &Controller) -> ViewState {
        load_view_state(c.store(), STATE_KEY)
    }

    #[test]
    fn start_renders_saves_and_primes_widgets() {
        let c = controller_with(Some(r#"{"category":"JavaScript","query":"основи","sort":"title"}"#));
        assert_eq!(c.search_field(), "основи");
        assert_eq!(c.sort_selector(), SortMode::Title);
        assert_eq!(shown_titles(&c), vec!["Основи JavaScript"]);
        assert_eq!(c.surface().count.as_deref(), Some("Кількість публікацій: 1"));
        let bar = c.surface().bar.as_ref().unwrap();
        assert_eq!(bar.buttons[bar.active_index().unwrap()].label, "JavaScript");
        assert_eq!(c.store().writes, 1);
    }

    #[test]
    fn start_with_corrupt_state_uses_defaults() {
        let c = controller_with(Some("{{{"));
        assert_eq!(c.state(), &ViewState::default());
        assert_eq!(shown_titles(&c).len(), 4);
        // Corrupt value is replaced by a valid record
        assert_eq!(persisted(&c), ViewState::default());
    }

    #[test]
    fn select_category_filters_moves_active_and_saves() {
        let mut c = controller_with(None);
        c.select_category("CSS");
        assert_eq!(shown_titles(&c), vec!["Гнучкі макети з Flexbox"]);
        let bar = c.surface().bar.as_ref().unwrap();
        let pressed: Vec<&str> = bar
            .buttons
            .iter()
            .filter(|b| b.pressed)
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(pressed, vec!["CSS"]);
        assert_eq!(persisted(&c).category, "CSS");
        assert_eq!(c.store().writes, 2);
    }

    #[test]
    fn submit_search_applies_trimmed_text_and_calls_hook() {
        let seen: Rc<RefCell<Vec<(String, Option<String>)>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let mut c = InputController::new(
            builtin_articles(),
            CountingStore::default(),
            RecordingSurface::default(),
            ControllerOptions::default(),
        )
        .with_match_hook(move |q, found| {
            sink.borrow_mut()
                .push((q.to_string(), found.map(|a| a.title.clone())));
        });
        c.start();

        let t0 = Instant::now();
        c.input_changed("  масив ", t0);
        c.submit_search();

        assert_eq!(c.state().query, "масив");
        assert_eq!(shown_titles(&c), vec!["Методи масивів у JavaScript"]);
        assert_eq!(
            seen.borrow().as_slice(),
            &[("масив".to_string(), Some("Методи масивів у JavaScript".to_string()))]
        );
        // The explicit search superseded the pending typed-text cycle
        assert!(c.next_deadline().is_none());
        assert!(!c.tick(t0 + DELAY));
    }

    #[test]
    fn typed_burst_runs_one_cycle_with_last_value() {
        let mut c = controller_with(None);
        let renders_before = c.surface().result_renders;
        let writes_before = c.store().writes;

        let t0 = Instant::now();
        let burst = ["f", "fl", "fle", "flex", "flexbox"];
        for (i, text) in burst.iter().enumerate() {
            let at = t0 + Duration::from_millis(50 * i as u64);
            c.input_changed(*text, at);
            assert!(!c.tick(at));
        }
        assert_eq!(c.search_field(), "flexbox");
        // Nothing applied yet
        assert_eq!(c.state().query, "");
        assert_eq!(c.surface().result_renders, renders_before);

        let last = t0 + Duration::from_millis(200);
        assert_eq!(c.next_deadline(), Some(last + DELAY));
        assert!(!c.tick(last + DELAY - Duration::from_millis(1)));
        assert!(c.tick(last + DELAY));
        assert!(!c.tick(last + DELAY * 2));

        assert_eq!(c.state().query, "flexbox");
        assert_eq!(c.surface().result_renders, renders_before + 1);
        assert_eq!(c.store().writes, writes_before + 1);
        assert_eq!(persisted(&c).query, "flexbox");
        assert_eq!(shown_titles(&c), vec!["Гнучкі макети з Flexbox"]);
    }

    #[test]
    fn change_sort_reorders_and_saves() {
        let mut c = controller_with(None);
        c.change_sort(SortMode::Oldest);
        assert_eq!(c.sort_selector(), SortMode::Oldest);
        assert_eq!(
            shown_titles(&c),
            vec![
                "Семантика HTML5",
                "Гнучкі макети з Flexbox",
                "Основи JavaScript",
                "Методи масивів у JavaScript",
            ]
        );
        assert_eq!(persisted(&c).sort_mode, SortMode::Oldest);
    }

    #[test]
    fn change_sort_token_rejects_unknown_without_side_effects() {
        let mut c = controller_with(None);
        let writes = c.store().writes;
        assert!(c.change_sort_token("sideways").is_err());
        assert_eq!(c.state().sort_mode, SortMode::Newest);
        assert_eq!(c.store().writes, writes);
        c.change_sort_token("title").unwrap();
        assert_eq!(c.state().sort_mode, SortMode::Title);
    }

    #[test]
    fn empty_result_renders_placeholder_with_zero_count() {
        let mut c = controller_with(None);
        c.select_category("HTML");
        c.input_changed("zzznotfound", Instant::now());
        c.submit_search();
        assert_eq!(c.surface().results, Some(ResultsDocument::Empty));
        assert_eq!(c.surface().count.as_deref(), Some("Кількість публікацій: 0"));
        assert!(c.results().is_empty());
    }

    #[test]
    fn dispatch_routes_intents() {
        let mut c = controller_with(None);
        let now = Instant::now();
        c.dispatch(Intent::SelectCategory("JavaScript".into()), now);
        c.dispatch(Intent::ChangeSort(SortMode::Title), now);
        c.dispatch(Intent::InputChanged("методи".into()), now);
        assert_eq!(c.state().query, "");
        c.dispatch(Intent::Search, now);
        assert_eq!(
            c.state(),
            &ViewState {
                category: "JavaScript".into(),
                query: "методи".into(),
                sort_mode: SortMode::Title,
            }
        );
        assert_eq!(persisted(&c), c.state().clone());
    }

    #[test]
    fn custom_state_key_and_delay() {
        let mut c = InputController::new(
            builtin_articles(),
            MemoryStore::new(),
            RecordingSurface::default(),
            ControllerOptions {
                state_key: "myState".into(),
                debounce: Duration::from_millis(50),
            },
        );
        c.start();
        let t0 = Instant::now();
        c.input_changed("html", t0);
        assert!(c.tick(t0 + Duration::from_millis(50)));
        assert_eq!(load_view_state(c.store(), "myState").query, "html");
        assert_eq!(c.store().get(STATE_KEY), None);
    }
}
