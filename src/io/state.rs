use serde::Deserialize;
use tracing::{debug, warn};

use crate::io::kv::KvStore;
use crate::model::{SortMode, ViewState};

/// Default key of the persisted view state
pub const STATE_KEY: &str = "blogState";

/// Persisted view state record. Every field is optional; unknown fields are
/// ignored.
#[derive(Debug, Default, Deserialize)]
struct PersistedState {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    sort: Option<SortMode>,
}

/// Read the view state from the slot, merging present fields over defaults.
///
/// A missing key, invalid JSON, or a record of the wrong shape all yield the
/// default state.
pub fn load_view_state(store: &impl KvStore, key: &str) -> ViewState {
    let mut state = ViewState::default();

    let Some(raw) = store.get(key) else {
        debug!(key, "no persisted view state");
        return state;
    };
    let persisted: PersistedState = match serde_json::from_str(&raw) {
        Ok(p) => p,
        Err(e) => {
            warn!(key, error = %e, "ignoring malformed persisted view state");
            return state;
        }
    };

    if let Some(category) = persisted.category {
        state.category = category;
    }
    if let Some(query) = persisted.query {
        state.query = query;
    }
    if let Some(sort) = persisted.sort {
        state.sort_mode = sort;
    }
    state
}

/// Write the full view state to the slot. Failures are traced and dropped.
pub fn save_view_state(store: &mut impl KvStore, key: &str, state: &ViewState) {
    let json = match serde_json::to_string(state) {
        Ok(j) => j,
        Err(e) => {
            warn!(error = %e, "failed to serialize view state");
            return;
        }
    };
    if let Err(e) = store.set(key, &json) {
        warn!(key, error = %e, "failed to persist view state");
    }
}
