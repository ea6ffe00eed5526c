use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::controller::{InputController, Intent};
use crate::io::kv::KvStore;

use super::input;
use super::render;
use super::surface::TuiSurface;
use super::theme::Theme;

/// Longest the event loop sleeps without a pending debounce
const IDLE_POLL: Duration = Duration::from_millis(250);

pub type TuiController = InputController<Box<dyn KvStore>, TuiSurface>;

/// Which widget receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Categories,
    Search,
    Results,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Categories => Focus::Search,
            Focus::Search => Focus::Results,
            Focus::Results => Focus::Categories,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Categories => Focus::Results,
            Focus::Search => Focus::Categories,
            Focus::Results => Focus::Search,
        }
    }
}

/// Main application state
pub struct App {
    pub controller: TuiController,
    pub focus: Focus,
    /// Highlighted button in the category bar (not necessarily the active one)
    pub category_cursor: usize,
    /// Index of the first visible post
    pub scroll: usize,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    seen_results_version: u64,
}

impl App {
    /// Start the controller (load state, first render) and wrap it
    pub fn new(mut controller: TuiController, theme: Theme, show_key_hints: bool) -> Self {
        controller.start();
        let category_cursor = controller.surface().bar.active_index().unwrap_or(0);
        let seen_results_version = controller.surface().results_version;
        App {
            controller,
            focus: Focus::Categories,
            category_cursor,
            scroll: 0,
            should_quit: false,
            theme,
            show_key_hints,
            seen_results_version,
        }
    }

    pub fn surface(&self) -> &TuiSurface {
        self.controller.surface()
    }

    pub fn dispatch(&mut self, intent: Intent, now: Instant) {
        self.controller.dispatch(intent, now);
        self.sync_with_surface();
    }

    /// Fire a due debounce cycle. Returns true if one ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        let fired = self.controller.tick(now);
        if fired {
            self.sync_with_surface();
        }
        fired
    }

    /// How long the event loop may block waiting for input
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.controller.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    pub fn post_count(&self) -> usize {
        self.surface().results.posts().len()
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.post_count().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    pub fn move_category_cursor(&mut self, delta: isize) {
        let len = self.surface().bar.buttons.len();
        if len == 0 {
            return;
        }
        self.category_cursor = self
            .category_cursor
            .saturating_add_signed(delta)
            .min(len - 1);
    }

    /// Activate the category under the cursor
    pub fn activate_category(&mut self, now: Instant) {
        let Some(button) = self.surface().bar.buttons.get(self.category_cursor) else {
            return;
        };
        let label = button.label.clone();
        self.dispatch(Intent::SelectCategory(label), now);
    }

    fn sync_with_surface(&mut self) {
        let surface = self.controller.surface();
        if surface.results_version != self.seen_results_version {
            self.seen_results_version = surface.results_version;
            self.scroll = 0;
        }
        if let Some(active) = surface.bar.active_index() {
            self.category_cursor = active;
        }
    }
}

/// Run the TUI application
pub fn run(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Typed text still waiting on the debounce window is applied, not lost
    if let Some(deadline) = app.controller.next_deadline() {
        app.tick(deadline);
    }
    info!(state = ?app.controller.state(), "exiting");

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        let timeout = app.poll_timeout(Instant::now());
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key, Instant::now());
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
