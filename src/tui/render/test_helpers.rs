use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::controller::{ControllerOptions, InputController};
use crate::io::articles_io::builtin_articles;
use crate::io::kv::{KvStore, MemoryStore};
use crate::io::state::STATE_KEY;
use crate::tui::app::App;
use crate::tui::surface::TuiSurface;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

fn app_with_store(store: MemoryStore) -> App {
    let store: Box<dyn KvStore> = Box::new(store);
    let controller = InputController::new(
        builtin_articles(),
        store,
        TuiSurface::default(),
        ControllerOptions::default(),
    );
    App::new(controller, Theme::default(), true)
}

/// Built-in articles, nothing persisted yet.
pub fn builtin_app() -> App {
    app_with_store(MemoryStore::new())
}

/// Built-in articles with `raw` already stored under the state key.
pub fn app_with_state(raw: &str) -> App {
    app_with_store(MemoryStore::with(STATE_KEY, raw))
}
