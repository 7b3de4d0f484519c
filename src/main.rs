//! A scroll-driven presentation TUI.
//!
//! Run the binary with a deck file to present it; run it bare (or with
//! `--demo`) for the built-in tour deck.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
    tracker,
};
use crate::core::deck::Deck;
use crate::ui::{
    deck_widget::DeckWidget,
    hud::DeckHud,
    layout::AppLayout,
    popup::{ControlsPopup, SettingsPopup},
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven presentation TUI")]
struct Cli {
    /// Deck file to present (the built-in tour when omitted).
    path: Option<PathBuf>,

    /// Present the built-in tour deck, ignoring any path.
    #[arg(long)]
    demo: bool,

    /// Animation frame rate override.
    #[arg(long)]
    fps: Option<u64>,

    /// Snap all animations to their end state.
    #[arg(long = "reduced-motion")]
    reduced_motion: bool,
}

// ───────────────────────────────────────── events ────────────

/// Route one event into state.  Ticks only wake the loop — all animation
/// advances once per frame, right before the draw.
fn apply_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Key(k) => handler::handle_key(state, k),
        AppEvent::Mouse(m) => handler::handle_mouse(state, m),
        AppEvent::Resize(w, h) => {
            // The bottom row belongs to the status bar.
            state.relayout(w, h.saturating_sub(1));
        }
        AppEvent::Tick => {}
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // keep the TUI's stdout clean
        .init();

    let cli = Cli::parse();

    // ── load the deck ─────────────────────────────────────────
    let deck = match (&cli.path, cli.demo) {
        (Some(path), false) => Deck::load(path)
            .with_context(|| format!("cannot load deck {}", path.display()))?,
        _ => Deck::sample(),
    };

    let mut config = config::AppConfig::load();
    if let Some(fps) = cli.fps {
        config.fps = fps.clamp(10, 120);
    }
    if cli.reduced_motion {
        config.reduced_motion = true;
    }

    let mut state = AppState::new(deck, config);
    let (cols, rows) = crossterm::terminal::size()?;
    state.relayout(cols, rows.saturating_sub(1));

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    // ── event channel ─────────────────────────────────────────
    let mut events = spawn_event_reader(state.config.frame_interval());
    let mut last_frame = Instant::now();
    let mut needs_draw = true;

    // ── event loop ────────────────────────────────────────────
    loop {
        // ── advance & draw first ───────────────────────────────
        // One pipeline pass per rendered frame: however many input events
        // arrived since the last draw, sampling happens exactly once.
        // Idle ticks with no animation in flight skip the pass entirely.
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64().min(0.25);
        last_frame = now;

        if needs_draw {
            tracker::advance_frame(&mut state, dt);

            terminal.draw(|frame| {
                let layout = AppLayout::from_area(frame.area());

                // Page background.
                frame.render_widget(
                    Block::default().style(Style::default().bg(Color::Rgb(
                        Theme::BG.0,
                        Theme::BG.1,
                        Theme::BG.2,
                    ))),
                    frame.area(),
                );

                let deck_widget = DeckWidget::new(&state.deck, &state.layout, &state.regions)
                    .offset(state.scroll.offset())
                    .pointer(state.pointer)
                    .easing(state.config.easing)
                    .pointer_tilt(state.config.pointer_tilt && !state.config.reduced_motion);
                frame.render_widget(deck_widget, layout.deck_area);

                let max = state.scroll.max_scroll();
                frame.render_widget(
                    DeckHud {
                        section: state.focused_section().unwrap_or(0),
                        section_count: state.deck.sections.len(),
                        scroll_fraction: if max > 0.0 {
                            state.scroll.offset() / max
                        } else {
                            1.0
                        },
                        pinned: state
                            .regions
                            .iter()
                            .any(|r| r.pin.as_ref().is_some_and(|p| p.held())),
                        frame: state.frame,
                    },
                    layout.deck_area,
                );

                let hint = state.config.status_bar_hint();
                let status_text = match state.active_view {
                    ActiveView::Deck => state.status_message.as_deref().unwrap_or(&hint),
                    ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => "",
                };
                let status = Paragraph::new(status_text).style(Theme::status_bar_style());
                frame.render_widget(status, layout.status_area);

                match state.active_view {
                    ActiveView::SettingsMenu => {
                        frame.render_widget(SettingsPopup { state: &state }, frame.area());
                    }
                    ActiveView::ControlsSubmenu => {
                        frame.render_widget(ControlsPopup { state: &state }, frame.area());
                    }
                    ActiveView::Deck => {}
                }
            })?;
        }

        // ── wait for input / next frame ───────────────────────
        let mut saw_input = false;
        if let Some(event) = events.recv().await {
            saw_input |= !matches!(event, AppEvent::Tick);
            apply_event(&mut state, event);
            // Batch-drain everything already queued so a burst of wheel
            // events coalesces into this frame instead of forcing one
            // redraw each.
            while let Ok(ev) = events.try_recv() {
                saw_input |= !matches!(ev, AppEvent::Tick);
                apply_event(&mut state, ev);
            }
        } else {
            break; // reader task ended
        }

        needs_draw = saw_input || tracker::needs_frames(&state);

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    // The reader task stops when the receiver drops, and no animation
    // state outlives `state` — nothing stale can fire after this point.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
