use crate::render::{CategoryBar, ResultsDocument, Surface};

/// Keeps the latest content of each target for the next draw pass
#[derive(Debug, Clone)]
pub struct TuiSurface {
    pub results: ResultsDocument,
    pub count: String,
    pub bar: CategoryBar,
    /// Bumped on every result render so the view can reset its scroll
    pub results_version: u64,
}

impl Default for TuiSurface {
    fn default() -> Self {
        TuiSurface {
            results: ResultsDocument::Empty,
            count: String::new(),
            bar: CategoryBar::default(),
            results_version: 0,
        }
    }
}

impl Surface for TuiSurface {
    fn show_results(&mut self, results: &ResultsDocument) {
        self.results = results.clone();
        self.results_version += 1;
    }

    fn show_count(&mut self, text: &str) {
        self.count = text.to_string();
    }

    fn show_category_bar(&mut self, bar: &CategoryBar) {
        self.bar = bar.clone();
    }
}
