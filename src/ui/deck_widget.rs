//! The deck widget — paints every section visible in the scrolled viewport.
//!
//! This is the paint phase of the frame pipeline.  All geometry (scroll
//! offset, section tops, pin holds) was computed before the draw began;
//! the widget only projects it onto the buffer, one section at a time,
//! in document order.  Sections are created fresh each frame.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::app::state::RegionState;
use crate::core::carousel::Role;
use crate::core::deck::{Deck, Item, PageLayout, Section, SectionKind};
use crate::core::easing::Easing;
use crate::core::pin::held_screen_top;
use crate::core::reveal::{
    local_progress, pose_at, reveal, showcase, showcase_active, staggered_progress, Anchors,
    VisualState,
};
use crate::core::scroll::PointerSample;

use super::fx;
use super::theme::Theme;

// ───────────────────────────────────────── widget ────────────

/// The deck widget itself — created fresh each frame.
pub struct DeckWidget<'a> {
    deck: &'a Deck,
    layout: &'a PageLayout,
    regions: &'a [RegionState],
    offset: f64,
    pointer: PointerSample,
    easing: Easing,
    pointer_tilt: bool,
}

impl<'a> DeckWidget<'a> {
    pub fn new(deck: &'a Deck, layout: &'a PageLayout, regions: &'a [RegionState]) -> Self {
        Self {
            deck,
            layout,
            regions,
            offset: 0.0,
            pointer: PointerSample::default(),
            easing: Easing::CubicOut,
            pointer_tilt: true,
        }
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn pointer(mut self, pointer: PointerSample) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn pointer_tilt(mut self, enabled: bool) -> Self {
        self.pointer_tilt = enabled;
        self
    }
}

impl Widget for DeckWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for ((section, geo), region) in self
            .deck
            .sections
            .iter()
            .zip(self.layout.sections.iter())
            .zip(self.regions.iter())
        {
            // Screen-space top edge; pinned stages freeze through their span.
            let screen_top = if geo.pin_span > 0.0 {
                held_screen_top(geo.top, geo.pin_span, self.offset)
            } else {
                geo.top - self.offset
            };
            let y = area.y as i32 + screen_top.round() as i32;
            let height = geo.height.round().max(1.0) as i32;

            // Entirely off-screen sections cost nothing.
            if y + height <= area.y as i32 || y >= area.y as i32 + area.height as i32 {
                continue;
            }

            let canvas = Canvas { area, y, height };
            match section.kind {
                SectionKind::Billboard => self.render_billboard(section, region, canvas, buf),
                SectionKind::Grid => self.render_grid(section, region, canvas, buf),
                SectionKind::Timeline => self.render_timeline(section, region, canvas, buf),
                SectionKind::Showcase => self.render_showcase(section, region, canvas, buf),
                SectionKind::Carousel => self.render_carousel(section, region, canvas, buf),
            }
        }
    }
}

// ───────────────────────────────────────── canvas ────────────

/// One section's screen-space slot: `y`/`height` may extend past `area`;
/// every draw clips row-by-row against it.
#[derive(Clone, Copy)]
struct Canvas {
    area: Rect,
    y: i32,
    height: i32,
}

impl Canvas {
    /// Clipped rectangle of the visible part, if any.
    fn visible(&self) -> Option<Rect> {
        let top = self.y.max(self.area.y as i32);
        let bottom = (self.y + self.height).min(self.area.y as i32 + self.area.height as i32);
        if bottom <= top {
            return None;
        }
        Some(Rect::new(
            self.area.x,
            top as u16,
            self.area.width,
            (bottom - top) as u16,
        ))
    }

    /// Paint one line at a section-relative row, clipped to the viewport.
    fn line(&self, buf: &mut Buffer, row: i32, x: i32, line: Line<'_>, max_width: u16) {
        let y = self.y + row;
        if y < self.area.y as i32 || y >= self.area.y as i32 + self.area.height as i32 {
            return;
        }
        let x = x.max(self.area.x as i32);
        if x >= self.area.x as i32 + self.area.width as i32 {
            return;
        }
        let width = max_width.min((self.area.x + self.area.width) as u16 - x as u16);
        buf.set_line(x as u16, y as u16, &line, width);
    }

    /// Paint one line centered at a section-relative row.
    fn centered(&self, buf: &mut Buffer, row: i32, text: String, style: Style) {
        let w = text.chars().count() as i32;
        let x = self.area.x as i32 + (self.area.width as i32 - w).max(0) / 2;
        self.line(buf, row, x, Line::from(Span::styled(text, style)), self.area.width);
    }
}

// ───────────────────────────────────────── sections ──────────

impl DeckWidget<'_> {
    /// Full-screen opener.  Fully shown at rest; fades and lifts as the
    /// user scrolls past (the second half of its traverse window).
    fn render_billboard(&self, section: &Section, region: &RegionState, c: Canvas, buf: &mut Buffer) {
        let exit = ((region.progress - 0.5) * 2.0).clamp(0.0, 1.0);
        let opacity = 1.0 - self.easing.apply(exit);
        let lift = (self.easing.apply(exit) * 4.0).round() as i32;

        let mid = c.height / 2;
        if let Some(kicker) = &section.kicker {
            c.centered(
                buf,
                mid - 3 - lift,
                format!("· {} ·", kicker.to_uppercase()),
                fx::faded(Theme::kicker_style(), opacity),
            );
        }

        // Letter-spaced headline, the typographic centerpiece.
        let spaced: String = section
            .title
            .to_uppercase()
            .chars()
            .flat_map(|ch| [ch, ' '])
            .collect();
        c.centered(
            buf,
            mid - 1 - lift,
            spaced.trim_end().to_string(),
            fx::faded(Theme::tag_style(Theme::accent(0)), opacity),
        );

        for (i, item) in section.items.iter().enumerate() {
            c.centered(
                buf,
                mid + 1 + i as i32 - lift,
                item.title.clone(),
                fx::faded(Theme::body_style(), opacity * 0.85),
            );
        }

        c.centered(
            buf,
            c.height - 2,
            "▾ scroll".into(),
            fx::faded(Theme::hint_style(), opacity),
        );
    }

    /// Columns of cards rising in one by one as the section enters.
    fn render_grid(&self, section: &Section, region: &RegionState, c: Canvas, buf: &mut Buffer) {
        self.render_header(section, region.progress, c, buf);

        let count = section.items.len();
        if count == 0 {
            return;
        }

        let inner_x = c.area.x as i32 + 2;
        let inner_w = c.area.width.saturating_sub(4) as i32;
        let cols = match inner_w {
            w if w >= 110 => 3,
            w if w >= 70 => 2,
            _ => 1,
        };
        let cell_w = (inner_w / cols).max(10);
        let cell_h = 6;
        let grid_top = 4;

        let anchors = Anchors::default();
        for (i, item) in section.items.iter().enumerate() {
            let local = staggered_progress(region.progress, i, count, section.stagger);
            let vs = pose_at(local, self.easing, &anchors);
            if vs.opacity <= 0.0 {
                continue;
            }

            let col = (i as i32) % cols;
            let row = (i as i32) / cols;
            let cell_x = inner_x + col * cell_w;
            let cell_y = c.y + grid_top + row * (cell_h + 1);
            let Some(stage) = fx::clip_rect(c.area, cell_x, cell_y, cell_w - 2, cell_h) else {
                continue;
            };
            let Some(rect) = fx::place(stage, stage.width, cell_h as u16, &vs) else {
                continue;
            };
            paint_card(buf, rect, item, Theme::accent(i), vs.opacity, false);
        }
    }

    /// Milestones down a vertical spine, revealed across the transit.
    fn render_timeline(&self, section: &Section, region: &RegionState, c: Canvas, buf: &mut Buffer) {
        self.render_header(section, region.progress, c, buf);

        let count = section.items.len();
        let spine_x = c.area.x as i32 + 6;

        // The spine grows with overall progress.
        if let Some(visible) = c.visible() {
            let grown = (c.height as f64 * region.progress).round() as i32;
            for row in 0..visible.height as i32 {
                let doc_row = visible.y as i32 + row - c.y;
                if doc_row >= 4 && doc_row <= grown.max(4) {
                    c.line(
                        buf,
                        doc_row,
                        spine_x,
                        Line::from(Span::styled("│", Theme::hint_style())),
                        1,
                    );
                }
            }
        }

        if count == 0 {
            return;
        }

        // Entries slide in from the right toward the spine while fading.
        let anchors = Anchors {
            hidden: VisualState {
                opacity: 0.0,
                dy: 0.0,
                dx: 8.0,
                scale: 1.0,
                tilt: 0.0,
            },
            revealed: VisualState::REST,
        };

        let band = (c.height - 8).max(1);
        for (i, item) in section.items.iter().enumerate() {
            let vs = reveal(region.progress, i, count, self.easing, &anchors);
            if vs.opacity <= 0.0 {
                continue;
            }
            let opacity = vs.opacity;
            let slide = vs.dx.round() as i32;
            let row = 5 + (i as i32 * band) / count as i32;
            let accent = Theme::accent(i);

            c.line(
                buf,
                row,
                spine_x,
                Line::from(Span::styled("●", fx::faded(Theme::tag_style(accent), opacity))),
                1,
            );

            let mut spans = Vec::new();
            if let Some(tag) = &item.tag {
                spans.push(Span::styled(
                    format!("{tag}  "),
                    fx::faded(Theme::kicker_style(), opacity),
                ));
            }
            spans.push(Span::styled(
                item.title.clone(),
                fx::faded(Theme::title_style(), opacity),
            ));
            c.line(buf, row, spine_x + 3 + slide, Line::from(spans), c.area.width);
            c.line(
                buf,
                row + 1,
                spine_x + 3 + slide,
                Line::from(Span::styled(
                    item.body.clone(),
                    fx::faded(Theme::body_style(), opacity * 0.8),
                )),
                c.area.width,
            );
        }
    }

    /// The pinned stage: cards fly through depth, one per span of scroll.
    fn render_showcase(&self, section: &Section, region: &RegionState, c: Canvas, buf: &mut Buffer) {
        let Some(stage) = c.visible() else { return };
        let count = section.items.len();
        let progress = region.progress;

        self.render_header(section, if progress > 0.0 { 1.0 } else { 0.0 }, c, buf);

        let Some(active) = showcase_active(progress, count) else {
            // Zero cards: the stage degrades to its header alone.
            return;
        };

        // Virtualized: only the front card and its successor can be
        // visible inside the cross-fade windows.
        let candidates = [active, active + 1];
        for &i in &candidates {
            if i >= count {
                continue;
            }
            let local = local_progress(progress, i, count);
            let st = showcase(local);
            if st.opacity <= 0.0 {
                continue;
            }

            let (mut dx, mut dy) = (0, 0);
            if self.pointer_tilt {
                let (px, py) = fx::parallax(self.pointer, 3.0, 1.0);
                // Deep cards parallax more — they are "further away".
                dx = px + (px as f64 * st.depth).round() as i32;
                dy = py;
            }

            let vs = VisualState {
                opacity: st.opacity,
                dy: dy as f64 + st.depth * 2.0,
                dx: dx as f64,
                // Cards approach from deep and small; the zoom overshoot
                // keeps the front card slightly oversized until it settles.
                scale: st.zoom * (1.0 - st.depth * 0.55),
                tilt: 0.0,
            };

            let rest_w = (stage.width as f64 * 0.7) as u16;
            let rest_h = (stage.height as f64 * 0.55) as u16;
            if let Some(rect) = fx::place(stage, rest_w.max(16), rest_h.max(5), &vs) {
                paint_card(buf, rect, &section.items[i], Theme::accent(i), vs.opacity, true);
            }
        }

        // Navigation dots along the stage bottom.
        let mut spans = Vec::with_capacity(count * 2);
        for i in 0..count {
            let accent = Theme::accent(i);
            if i == active {
                spans.push(Span::styled("━━━", Theme::tag_style(accent)));
            } else {
                spans.push(Span::styled("─", Theme::hint_style()));
            }
            spans.push(Span::raw(" "));
        }
        let dots = Line::from(spans);
        let w = dots.width() as i32;
        let x = c.area.x as i32 + (c.area.width as i32 - w).max(0) / 2;
        c.line(buf, c.height - 2, x, dots, c.area.width);
    }

    /// Discrete stacked-card deck, advanced by key presses.
    fn render_carousel(&self, section: &Section, region: &RegionState, c: Canvas, buf: &mut Buffer) {
        self.render_header(section, region.progress, c, buf);
        let Some(stage_full) = c.visible() else { return };
        let Some(ref carousel) = region.carousel else {
            return;
        };
        if carousel.count() == 0 {
            return;
        }

        // Keep the header rows clear of the card stack when there is room.
        let header_rows = if stage_full.height > 12 { 4 } else { 0 };
        let stage = Rect::new(
            stage_full.x,
            stage_full.y + header_rows,
            stage_full.width,
            stage_full.height - header_rows,
        );

        let rest_w = (stage.width as f64 * 0.6) as u16;
        let rest_h = (stage.height as f64 * 0.5) as u16;

        // Paint waiting cards first, then the leaving one, the active card
        // last so the stack layers correctly.
        for pass in [Role::Waiting, Role::Leaving, Role::Active] {
            for (i, item) in section.items.iter().enumerate() {
                if carousel.role(i) != pass {
                    continue;
                }
                let mut vs = carousel.state_of(i);
                if vs.opacity <= 0.0 {
                    continue;
                }
                // Backward transitions mirror: the leaving card drops back
                // into the stack instead of flying out the top.
                if pass == Role::Leaving && carousel.direction() < 0 {
                    vs.dy = -vs.dy;
                }
                // Tilt reads as a horizontal nudge in cell space.
                let vs = VisualState {
                    dx: vs.dx + vs.tilt * 2.0,
                    ..vs
                };
                if let Some(rect) = fx::place(stage, rest_w.max(20), rest_h.max(5), &vs) {
                    paint_card(buf, rect, item, Theme::accent(i), vs.opacity, true);
                }
            }
        }

        c.centered(
            buf,
            c.height - 2,
            format!("{} / {} · space for next", carousel.active() + 1, carousel.count()),
            Theme::hint_style(),
        );
    }

    /// Kicker + title block shared by the non-billboard sections.
    fn render_header(&self, section: &Section, progress: f64, c: Canvas, buf: &mut Buffer) {
        let opacity = self.easing.apply((progress * 3.0).clamp(0.0, 1.0));
        if opacity <= 0.0 {
            return;
        }
        let x = c.area.x as i32 + 2;
        if let Some(kicker) = &section.kicker {
            c.line(
                buf,
                1,
                x,
                Line::from(Span::styled(
                    kicker.to_uppercase(),
                    fx::faded(Theme::kicker_style(), opacity),
                )),
                c.area.width,
            );
        }
        c.line(
            buf,
            2,
            x,
            Line::from(Span::styled(
                section.title.to_uppercase(),
                fx::faded(Theme::title_style(), opacity),
            )),
            c.area.width,
        );
    }
}

// ───────────────────────────────────────── cards ─────────────

/// Paint one card into `rect`: bordered box, tag row, title, body.
fn paint_card(
    buf: &mut Buffer,
    rect: Rect,
    item: &Item,
    accent: (u8, u8, u8),
    opacity: f64,
    bordered: bool,
) {
    if rect.width < 6 || rect.height < 2 {
        return;
    }

    let inner = if bordered {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(fx::blend(accent, opacity * 0.7)));
        let inner = block.inner(rect);
        block.render(rect, buf);
        inner
    } else {
        rect
    };
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut row = inner.y;
    if let Some(tag) = &item.tag {
        let line = Line::from(Span::styled(
            format!("▎{}", tag.to_uppercase()),
            fx::faded(Theme::tag_style(accent), opacity),
        ));
        buf.set_line(inner.x, row, &line, inner.width);
        row = row.saturating_add(1);
    }
    if row < inner.bottom() {
        let line = Line::from(Span::styled(
            truncate(&item.title, inner.width as usize),
            fx::faded(Theme::title_style(), opacity),
        ));
        buf.set_line(inner.x, row, &line, inner.width);
        row = row.saturating_add(1);
    }
    if row < inner.bottom() && !item.body.is_empty() {
        let line = Line::from(Span::styled(
            truncate(&item.body, inner.width as usize),
            fx::faded(Theme::body_style(), opacity * 0.8),
        ));
        buf.set_line(inner.x, row, &line, inner.width);
    }
}

/// Truncate to `width` display cells with an ellipsis.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let cut = width.saturating_sub(1);
    let mut out: String = s.chars().take(cut).collect();
    out.push('…');
    out
}
