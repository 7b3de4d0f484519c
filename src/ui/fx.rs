//! Render adapter — projects a [`VisualState`] onto terminal paint.
//!
//! Pure geometry and colour math: opacity becomes a blend toward the page
//! background, translation becomes a cell offset, scale an inset.  Nothing
//! here reads layout back from the buffer or keeps state; geometry always
//! arrives from the caller.  A target that ends up off-screen or empty is
//! a silent no-op (`None`), never an error — elements vanish mid-frame all
//! the time when the user flings the scroll.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use crate::core::reveal::VisualState;
use crate::core::scroll::PointerSample;

use super::theme::Theme;

// ───────────────────────────────────────── colour ────────────

/// Blend an RGB colour toward the page background by `1 - opacity`.
pub fn blend(fg: (u8, u8, u8), opacity: f64) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    let ch = |f: u8, b: u8| (b as f64 + (f as f64 - b as f64) * t).round() as u8;
    Color::Rgb(
        ch(fg.0, Theme::BG.0),
        ch(fg.1, Theme::BG.1),
        ch(fg.2, Theme::BG.2),
    )
}

/// Apply an item's opacity to a style.  RGB foregrounds blend smoothly;
/// palette colours can't be interpolated, so they dim below half opacity.
pub fn faded(style: Style, opacity: f64) -> Style {
    let opacity = opacity.clamp(0.0, 1.0);
    match style.fg {
        Some(Color::Rgb(r, g, b)) => style.fg(blend((r, g, b), opacity)),
        Some(_) if opacity < 0.5 => style.fg(Color::DarkGray),
        _ => style,
    }
}

// ───────────────────────────────────────── geometry ──────────

/// Place an item inside its stage: scale shrinks toward the center,
/// dx/dy translate, and the result is clipped to the stage.  Returns
/// `None` when nothing remains visible.
pub fn place(stage: Rect, rest_w: u16, rest_h: u16, vs: &VisualState) -> Option<Rect> {
    if stage.width == 0 || stage.height == 0 {
        return None;
    }

    let scale = vs.scale.max(0.0);
    let w = (rest_w as f64 * scale).round() as i32;
    let h = (rest_h as f64 * scale).round() as i32;
    if w <= 0 || h <= 0 {
        return None;
    }

    // Centered at rest, then displaced.
    let cx = stage.x as i32 + stage.width as i32 / 2;
    let cy = stage.y as i32 + stage.height as i32 / 2;
    let x = cx - w / 2 + vs.dx.round() as i32;
    let y = cy - h / 2 + vs.dy.round() as i32;

    clip_rect(stage, x, y, w, h)
}

/// Clip an integer rectangle to a stage.  `None` when the intersection is
/// empty or the rectangle sits entirely off-screen.
pub fn clip_rect(stage: Rect, x: i32, y: i32, w: i32, h: i32) -> Option<Rect> {
    let left = x.max(stage.x as i32);
    let top = y.max(stage.y as i32);
    let right = (x + w).min(stage.x as i32 + stage.width as i32);
    let bottom = (y + h).min(stage.y as i32 + stage.height as i32);
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

/// Pointer-driven parallax displacement for a stage, in cells.
/// Centered pointer → zero shift; edges reach ±`max_dx`/±`max_dy`.
pub fn parallax(pointer: PointerSample, max_dx: f64, max_dy: f64) -> (i32, i32) {
    let (tx, ty) = pointer.tilt();
    (
        (tx * 2.0 * max_dx).round() as i32,
        (ty * 2.0 * max_dy).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_hits_both_endpoints() {
        assert_eq!(blend((200, 100, 50), 1.0), Color::Rgb(200, 100, 50));
        assert_eq!(
            blend((200, 100, 50), 0.0),
            Color::Rgb(Theme::BG.0, Theme::BG.1, Theme::BG.2)
        );
    }

    #[test]
    fn faded_dims_palette_colours_below_half() {
        let style = Style::default().fg(Color::Yellow);
        assert_eq!(faded(style, 0.9).fg, Some(Color::Yellow));
        assert_eq!(faded(style, 0.2).fg, Some(Color::DarkGray));
    }

    #[test]
    fn place_centers_at_rest() {
        let stage = Rect::new(0, 0, 40, 20);
        let rect = place(stage, 20, 10, &VisualState::REST).unwrap();
        assert_eq!(rect, Rect::new(10, 5, 20, 10));
    }

    #[test]
    fn place_translates_and_clips() {
        let stage = Rect::new(0, 0, 40, 20);
        let vs = VisualState {
            dy: 12.0,
            ..VisualState::REST
        };
        let rect = place(stage, 20, 10, &vs).unwrap();
        // Pushed down by 12: top lands at 17, clipped against the stage
        // bottom so only 3 rows survive.
        assert_eq!(rect, Rect::new(10, 17, 20, 3));
    }

    #[test]
    fn fully_displaced_item_is_a_silent_no_op() {
        let stage = Rect::new(0, 0, 40, 20);
        let vs = VisualState {
            dy: 100.0,
            ..VisualState::REST
        };
        assert_eq!(place(stage, 20, 10, &vs), None);
        assert_eq!(place(Rect::new(0, 0, 0, 0), 20, 10, &VisualState::REST), None);
    }

    #[test]
    fn zero_scale_vanishes() {
        let stage = Rect::new(0, 0, 40, 20);
        let vs = VisualState {
            scale: 0.0,
            ..VisualState::REST
        };
        assert_eq!(place(stage, 20, 10, &vs), None);
    }

    #[test]
    fn parallax_is_zero_at_center_and_signed_at_edges() {
        assert_eq!(parallax(PointerSample::default(), 3.0, 2.0), (0, 0));
        assert_eq!(parallax(PointerSample::new(1.0, 0.0), 3.0, 2.0), (3, -2));
        assert_eq!(parallax(PointerSample::new(0.0, 1.0), 3.0, 2.0), (-3, 2));
    }
}
