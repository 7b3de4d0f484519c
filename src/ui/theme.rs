//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    /// Page background, as RGB for opacity blending.
    pub const BG: (u8, u8, u8) = (6, 6, 10);

    /// Body text at full opacity.
    pub const FG: (u8, u8, u8) = (222, 222, 228);

    /// Muted text (kickers, tags, hints).
    pub const MUTED: (u8, u8, u8) = (128, 128, 140);

    /// Accent palette, cycled by item index across the deck.
    pub const ACCENTS: [(u8, u8, u8); 5] = [
        (99, 102, 241),  // indigo
        (6, 182, 212),   // cyan
        (16, 185, 129),  // emerald
        (245, 158, 11),  // amber
        (236, 72, 153),  // pink
    ];

    /// Accent colour for an item index (wraps around the palette).
    pub fn accent(index: usize) -> (u8, u8, u8) {
        Self::ACCENTS[index % Self::ACCENTS.len()]
    }

    // ── deck text ──────────────────────────────────────────────

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Rgb(Self::FG.0, Self::FG.1, Self::FG.2))
            .add_modifier(Modifier::BOLD)
    }

    pub fn kicker_style() -> Style {
        Style::default()
            .fg(Color::Rgb(Self::MUTED.0, Self::MUTED.1, Self::MUTED.2))
            .add_modifier(Modifier::ITALIC)
    }

    pub fn body_style() -> Style {
        Style::default().fg(Color::Rgb(Self::FG.0, Self::FG.1, Self::FG.2))
    }

    pub fn tag_style(accent: (u8, u8, u8)) -> Style {
        Style::default()
            .fg(Color::Rgb(accent.0, accent.1, accent.2))
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn hint_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn hud_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}
