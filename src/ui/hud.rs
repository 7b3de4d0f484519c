//! Scroll indicator — section counter + progress readout rendered in the
//! top-right corner of the deck area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Pulse frames shown while a section is pinned.
const PULSE_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// A small "where am I" indicator.
///
/// Render this on top of the deck area.  It picks its own position
/// (top-right of `area`) and stays out of the way on narrow terminals.
pub struct DeckHud {
    /// 0-based index of the section under the viewport center.
    pub section: usize,
    pub section_count: usize,
    /// Overall scroll position ∈ [0, 1].
    pub scroll_fraction: f64,
    /// Whether a pinned section currently holds the viewport.
    pub pinned: bool,
    /// Monotonically increasing frame counter (drives the pulse).
    pub frame: u64,
}

impl Widget for DeckHud {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 24 || area.height == 0 || self.section_count == 0 {
            return;
        }

        let pct = (self.scroll_fraction.clamp(0.0, 1.0) * 100.0).round() as u32;
        let label = if self.pinned {
            let pulse = PULSE_FRAMES[(self.frame / 4) as usize % PULSE_FRAMES.len()];
            format!(
                " {pulse} pinned · {:02}/{:02} · {pct:>3}% ",
                self.section + 1,
                self.section_count
            )
        } else {
            format!(
                " {:02}/{:02} · {pct:>3}% ",
                self.section + 1,
                self.section_count
            )
        };

        let label_width = label.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(label_width + 1);
        let y = area.y;

        let line = Line::from(Span::styled(label, Theme::hud_style()));
        buf.set_line(x, y, &line, label_width);
    }
}
