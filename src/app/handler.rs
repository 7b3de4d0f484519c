//! Input handling — maps key/mouse events to state mutations.
//!
//! Handlers never recompute animation state.  Scroll input lands in the
//! scroll model's pending delta, pointer motion overwrites the latest
//! sample, and the tracker folds both in on the next frame.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::{Action, KeyBind};
use crate::core::scroll::PointerSample;

use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState};

/// Total selectable rows in the controls submenu (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Deck => handle_deck_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsSubmenu => {
            if state.awaiting_rebind {
                handle_rebind_key(state, key);
            } else {
                handle_controls_key(state, key);
            }
        }
    }
}

// ── Deck view (configurable bindings) ───────────────────────────

fn handle_deck_key(state: &mut AppState, key: KeyEvent) {
    // Digit keys jump straight to a carousel card (1 = first).
    if let KeyCode::Char(c) = key.code {
        if let Some(d) = c.to_digit(10) {
            if d >= 1 {
                if let Some(carousel) = state.focused_carousel() {
                    carousel.go_to(d as usize - 1);
                }
                return;
            }
        }
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    let page = state.viewport.1 as f64;
    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::ScrollUp => {
            state.scroll.scroll_by(-state.config.wheel_rows);
        }
        Action::ScrollDown => {
            state.scroll.scroll_by(state.config.wheel_rows);
        }
        Action::PageUp => {
            state.scroll.scroll_by(-page);
        }
        Action::PageDown => {
            state.scroll.scroll_by(page);
        }
        Action::JumpTop => {
            state.scroll.scroll_to(0.0);
        }
        Action::JumpBottom => {
            let bottom = state.scroll.max_scroll();
            state.scroll.scroll_to(bottom);
        }
        Action::NextSection => jump_section(state, 1),
        Action::PrevSection => jump_section(state, -1),
        Action::Advance => {
            if let Some(carousel) = state.focused_carousel() {
                carousel.advance();
            }
        }
        Action::Back => {
            if let Some(carousel) = state.focused_carousel() {
                carousel.back();
            }
        }
    }
}

/// Scroll to the top of the neighbouring section, relative to where the
/// scroll is already heading (so repeated presses chain cleanly).
fn jump_section(state: &mut AppState, dir: i64) {
    if state.layout.sections.is_empty() {
        return;
    }
    let heading = state.scroll.target();
    let tops: Vec<f64> = state.layout.sections.iter().map(|g| g.top).collect();

    let target = if dir > 0 {
        tops.iter().copied().find(|&t| t > heading + 0.5)
    } else {
        tops.iter().rev().copied().find(|&t| t < heading - 0.5)
    };

    if let Some(t) = target {
        state.scroll.scroll_to(t);
    } else if dir < 0 {
        state.scroll.scroll_to(0.0);
    }
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Deck;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                match item {
                    SettingsItem::Submenu { view, .. } => {
                        state.active_view = *view;
                        state.controls_selected = 0;
                    }
                    SettingsItem::Toggle { get, set, .. } => {
                        let current = get(state);
                        set(state, !current);
                    }
                    SettingsItem::Cycle { cycle, .. } => {
                        cycle(state);
                    }
                }
            }
        }
        _ => {}
    }
}

// ── Controls submenu (hardcoded navigation, interactive rebinding) ──

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let item_count = controls_item_count();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Deck;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected < item_count - 1 {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected < Action::ALL.len() {
                // Start rebinding the selected action.
                state.awaiting_rebind = true;
            } else {
                // "Reset to defaults" item.
                state.config.reset_defaults();
                let _ = state.config.save();
            }
        }
        KeyCode::Delete | KeyCode::Backspace => {
            // Clear all bindings for the selected action.
            if state.controls_selected < Action::ALL.len() {
                let action = Action::ALL[state.controls_selected];
                state.config.bindings.insert(action, Vec::new());
                let _ = state.config.save();
            }
        }
        _ => {}
    }
}

/// Capture the next key press as a new binding.
fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    // Only process Press events (ignore Release/Repeat on supported terminals).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Esc cancels rebinding.
    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }

    // Don't allow rebinding Ctrl+C (reserved for emergency quit).
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return;
    }

    let action = Action::ALL[state.controls_selected];
    let bind = KeyBind::from_key_event(key);
    state.config.add_binding(action, bind);
    let _ = state.config.save();
    state.awaiting_rebind = false;
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
///
/// Wheel and pointer motion are pure accumulation — the frame pipeline
/// consumes at most one pointer sample and one folded wheel delta per
/// frame, however many events the terminal delivered.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Deck {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            state.scroll.scroll_by(state.config.wheel_rows);
        }
        MouseEventKind::ScrollUp => {
            state.scroll.scroll_by(-state.config.wheel_rows);
        }
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            let (w, h) = state.viewport;
            if w > 0 && h > 0 {
                state.pointer = PointerSample::new(
                    mouse.column as f64 / w as f64,
                    mouse.row as f64 / h as f64,
                );
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            // Clicking a carousel acts like its "next" button.
            if let Some(carousel) = state.focused_carousel() {
                carousel.advance();
            }
        }
        _ => {}
    }
}
