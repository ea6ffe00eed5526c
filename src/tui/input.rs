use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::Intent;
use crate::util::unicode::pop_grapheme;

use super::app::{App, Focus};

/// Handle a key event for the focused widget
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.focus {
        Focus::Search => handle_search_field(app, key, now),
        Focus::Categories | Focus::Results => handle_navigate(app, key, now),
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.prev(),
        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Char('s') => {
            let next = app.controller.sort_selector().next();
            app.dispatch(Intent::ChangeSort(next), now);
        }
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1),
        KeyCode::Char('g') | KeyCode::Home => app.scroll = 0,
        KeyCode::Char('G') | KeyCode::End => app.scroll_by(isize::MAX),
        KeyCode::Left | KeyCode::Char('h') if app.focus == Focus::Categories => {
            app.move_category_cursor(-1)
        }
        KeyCode::Right | KeyCode::Char('l') if app.focus == Focus::Categories => {
            app.move_category_cursor(1)
        }
        KeyCode::Enter | KeyCode::Char(' ') if app.focus == Focus::Categories => {
            app.activate_category(now)
        }
        _ => {}
    }
}

fn handle_search_field(app: &mut App, key: KeyEvent, now: Instant) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.focus = Focus::Results,
        (_, KeyCode::Tab) => app.focus = app.focus.next(),
        (_, KeyCode::BackTab) => app.focus = app.focus.prev(),

        // Explicit search
        (_, KeyCode::Enter) => {
            app.dispatch(Intent::Search, now);
            app.focus = Focus::Results;
        }

        (_, KeyCode::Backspace) => {
            let mut text = app.controller.search_field().to_string();
            if pop_grapheme(&mut text) {
                app.dispatch(Intent::InputChanged(text), now);
            }
        }

        // Type character
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            let mut text = app.controller.search_field().to_string();
            text.push(c);
            app.dispatch(Intent::InputChanged(text), now);
        }

        _ => {}
    }
}
