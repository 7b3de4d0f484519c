//! Progress → visual-state mapping.
//!
//! Pure functions from a region's scroll progress to per-item visual
//! states.  Nothing here touches the terminal, reads a clock, or keeps
//! state — the same inputs always produce bit-identical outputs, which is
//! what makes the reveal pipeline testable without a rendering
//! environment.

use super::easing::Easing;

// ───────────────────────────────────────── visual state ──────

/// The animatable properties of one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    /// 0 = invisible, 1 = fully opaque.
    pub opacity: f64,
    /// Vertical displacement in rows (positive = pushed down).
    pub dy: f64,
    /// Horizontal displacement in columns.
    pub dx: f64,
    /// 1 = natural size; < 1 shrinks the item toward its center.
    pub scale: f64,
    /// Signed tilt factor (columns of skew per row from center).
    pub tilt: f64,
}

impl VisualState {
    /// The at-rest pose: fully revealed, untransformed.
    pub const REST: VisualState = VisualState {
        opacity: 1.0,
        dy: 0.0,
        dx: 0.0,
        scale: 1.0,
        tilt: 0.0,
    };

    /// Linear interpolation between two poses.
    pub fn lerp(a: &VisualState, b: &VisualState, t: f64) -> VisualState {
        let l = |x: f64, y: f64| x + (y - x) * t;
        VisualState {
            opacity: l(a.opacity, b.opacity),
            dy: l(a.dy, b.dy),
            dx: l(a.dx, b.dx),
            scale: l(a.scale, b.scale),
            tilt: l(a.tilt, b.tilt),
        }
    }
}

/// Hidden/revealed anchor poses for one reveal treatment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors {
    pub hidden: VisualState,
    pub revealed: VisualState,
}

impl Default for Anchors {
    /// The house style: rise from below while fading in.
    fn default() -> Self {
        Self {
            hidden: VisualState {
                opacity: 0.0,
                dy: 5.0,
                dx: 0.0,
                scale: 0.92,
                tilt: 0.0,
            },
            revealed: VisualState::REST,
        }
    }
}

// ───────────────────────────────────────── item progress ─────

/// Local progress of item `index` out of `count` when the items split the
/// region's progress range into equal consecutive sub-intervals.
///
/// Item `i` owns `[i/N, (i+1)/N)`; inside it, local progress runs 0 → 1.
/// `count == 0` degrades to fully revealed (there is nothing to stagger).
pub fn local_progress(progress: f64, index: usize, count: usize) -> f64 {
    if count == 0 {
        return 1.0;
    }
    let n = count as f64;
    let start = index as f64 / n;
    ((progress - start) * n).clamp(0.0, 1.0)
}

/// Local progress with overlapping windows: each item's window still spans
/// `1/N` of the region but starts `stagger` (a fraction of the full range,
/// e.g. 0.1 · i) after the previous one, so items animate concurrently with
/// an offset instead of strictly one after another.
pub fn staggered_progress(progress: f64, index: usize, count: usize, stagger: f64) -> f64 {
    if count == 0 {
        return 1.0;
    }
    let window = 1.0 / count as f64;
    let start = (stagger * index as f64).min(1.0 - window);
    ((progress - start) / window).clamp(0.0, 1.0)
}

// ───────────────────────────────────────── mapper ────────────

/// Map region progress to the visual state of one item.
///
/// Endpoint exactness: progress 0 yields the hidden anchor verbatim and
/// progress 1 the revealed anchor, bypassing interpolation entirely so no
/// floating error can leak into the resting pose.
pub fn reveal(
    progress: f64,
    index: usize,
    count: usize,
    easing: Easing,
    anchors: &Anchors,
) -> VisualState {
    let local = local_progress(progress, index, count);
    pose_at(local, easing, anchors)
}

/// Same mapping over a pre-computed local progress (used by the staggered
/// variant and by discrete transitions).
pub fn pose_at(local: f64, easing: Easing, anchors: &Anchors) -> VisualState {
    if local <= 0.0 {
        return anchors.hidden;
    }
    if local >= 1.0 {
        return anchors.revealed;
    }
    VisualState::lerp(&anchors.hidden, &anchors.revealed, easing.apply(local))
}

// ───────────────────────────────────────── showcase ──────────

/// Depth-stage state of one showcase card.
///
/// Cards fly in from depth toward the viewer as their local progress
/// advances: depth and zoom decay linearly, opacity ramps in over the first
/// fifth of the window and back out over the last fifth so consecutive
/// cards cross-fade instead of popping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowcaseState {
    /// 1 = far away, 0 = at the screen plane.
    pub depth: f64,
    /// Oversize factor while the card is still approaching (≥ 1).
    pub zoom: f64,
    /// 0..1 cross-fade opacity.
    pub opacity: f64,
}

/// Fraction of the card window spent fading at each edge.
const SHOWCASE_FADE: f64 = 0.2;

pub fn showcase(local: f64) -> ShowcaseState {
    let local = local.clamp(0.0, 1.0);
    let opacity = if local > 1.0 - SHOWCASE_FADE {
        (1.0 - local) / SHOWCASE_FADE
    } else {
        (local / SHOWCASE_FADE).min(1.0)
    };
    ShowcaseState {
        depth: 1.0 - local,
        zoom: 1.0 + (1.0 - local) * 0.3,
        opacity: opacity.clamp(0.0, 1.0),
    }
}

/// Which showcase card index is front-most at `progress`, given `count`
/// cards.  Returns `None` when the stage is empty.
pub fn showcase_active(progress: f64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let idx = (progress.clamp(0.0, 1.0) * count as f64) as usize;
    Some(idx.min(count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 4;

    #[test]
    fn local_progress_is_always_clamped() {
        for i in 0..N {
            for step in 0..=20 {
                let p = step as f64 / 20.0;
                let local = local_progress(p, i, N);
                assert!((0.0..=1.0).contains(&local), "p={p} i={i} → {local}");
            }
        }
    }

    #[test]
    fn items_split_the_range_into_sub_intervals() {
        // Item 1 of 4 owns [0.25, 0.5).
        assert_eq!(local_progress(0.25, 1, 4), 0.0);
        assert_eq!(local_progress(0.375, 1, 4), 0.5);
        assert_eq!(local_progress(0.5, 1, 4), 1.0);
        assert_eq!(local_progress(0.9, 1, 4), 1.0);
    }

    #[test]
    fn zero_items_degrade_to_revealed() {
        assert_eq!(local_progress(0.3, 0, 0), 1.0);
        assert_eq!(staggered_progress(0.3, 0, 0, 0.1), 1.0);
    }

    #[test]
    fn stagger_offsets_windows_without_shrinking_them() {
        // Three items, 10% stagger: item 2 starts at 0.2 and spans 1/3.
        assert_eq!(staggered_progress(0.2, 2, 3, 0.1), 0.0);
        assert!((staggered_progress(0.2 + 1.0 / 6.0, 2, 3, 0.1) - 0.5).abs() < 1e-9);
        assert_eq!(staggered_progress(0.6, 2, 3, 0.1), 1.0);
        // The last window is clamped so it still completes by progress 1.
        assert_eq!(staggered_progress(1.0, 9, 10, 0.2), 1.0);
    }

    #[test]
    fn anchors_are_exact_at_the_endpoints() {
        let anchors = Anchors::default();
        for i in 0..N {
            assert_eq!(reveal(0.0, i, N, Easing::CubicOut, &anchors), anchors.hidden);
            assert_eq!(
                reveal(1.0, i, N, Easing::CubicOut, &anchors),
                anchors.revealed
            );
        }
    }

    #[test]
    fn mapper_is_pure() {
        let anchors = Anchors::default();
        let a = reveal(0.37, 2, 5, Easing::ExpoOut, &anchors);
        let b = reveal(0.37, 2, 5, Easing::ExpoOut, &anchors);
        assert_eq!(a, b);
    }

    #[test]
    fn mid_progress_interpolates_between_anchors() {
        let anchors = Anchors::default();
        let vs = reveal(0.125, 0, 4, Easing::Linear, &anchors);
        assert!((vs.opacity - 0.5).abs() < 1e-9);
        assert!((vs.dy - 2.5).abs() < 1e-9);
        assert!(vs.scale > anchors.hidden.scale && vs.scale < 1.0);
    }

    #[test]
    fn showcase_fades_at_both_window_edges() {
        assert_eq!(showcase(0.0).opacity, 0.0);
        assert_eq!(showcase(0.5).opacity, 1.0);
        assert_eq!(showcase(1.0).opacity, 0.0);
        assert_eq!(showcase(0.5).depth, 0.5);
        assert!((showcase(0.0).zoom - 1.3).abs() < 1e-9);
        assert_eq!(showcase(1.0).zoom, 1.0);
    }

    #[test]
    fn showcase_active_tracks_progress_and_clamps() {
        assert_eq!(showcase_active(0.0, 5), Some(0));
        assert_eq!(showcase_active(0.5, 5), Some(2));
        assert_eq!(showcase_active(1.0, 5), Some(4));
        assert_eq!(showcase_active(0.5, 0), None);
    }
}
