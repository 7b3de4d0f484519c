//! Scroll read model — the single source of truth for scroll position.
//!
//! Only this module (driven by the viewport runtime) mutates the scroll
//! offset; every region reads it.  Regions translate the offset into a
//! normalized progress value via [`region_progress`], and wheel input is
//! smoothed through a retargetable tween so rapid events chain instead of
//! jumping.

use super::easing::Easing;

// ───────────────────────────────────────── progress ──────────

/// Raw progress of a tracked region: how far `offset` has travelled through
/// `[start, end]`, clamped to `[0, 1]`.
///
/// A degenerate region (`end <= start`, e.g. content shorter than the
/// viewport) reports 1.0 — fully revealed — instead of dividing by zero.
/// A page must degrade to "shown", never to "broken".
pub fn region_progress(start: f64, end: f64, offset: f64) -> f64 {
    if end <= start {
        return 1.0;
    }
    ((offset - start) / (end - start)).clamp(0.0, 1.0)
}

/// How a section's reveal window maps onto scroll offsets.
///
/// Anchors are viewport fractions crossed by the section's top edge:
/// 1.0 is the bottom of the viewport, 0.0 the top.  `Band { 0.95, 0.70 }`
/// reads "start revealing when the top reaches 95% of the viewport, finish
/// by 70%".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpanRule {
    /// Reveal across a band of viewport fractions.
    Band { enter_at: f64, complete_at: f64 },
    /// Reveal across the section's full transit: enters at the viewport
    /// bottom, completes when its bottom edge leaves the top.
    Traverse,
}

impl SpanRule {
    /// Default enter band used by plain content sections.
    pub const DEFAULT_BAND: SpanRule = SpanRule::Band {
        enter_at: 0.95,
        complete_at: 0.55,
    };

    /// Resolve the rule against current geometry.
    ///
    /// `top`/`height` are the section's document coordinates in rows,
    /// `viewport` the viewport height in rows.  Returns `(start, end)`
    /// scroll offsets.  The section's top sits at viewport fraction `f`
    /// when `offset == top - f * viewport`.
    pub fn resolve(self, top: f64, height: f64, viewport: f64) -> (f64, f64) {
        match self {
            SpanRule::Band {
                enter_at,
                complete_at,
            } => (top - enter_at * viewport, top - complete_at * viewport),
            SpanRule::Traverse => (top - viewport, top + height),
        }
    }
}

// ───────────────────────────────────────── pointer ───────────

/// Latest pointer position, normalized to the viewport.
///
/// Has no identity beyond "most recent sample": the runtime overwrites it
/// on every mouse event and the frame pipeline consumes at most one per
/// frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Horizontal position ∈ [0, 1] (0 = left edge).
    pub x: f64,
    /// Vertical position ∈ [0, 1] (0 = top edge).
    pub y: f64,
}

impl Default for PointerSample {
    fn default() -> Self {
        // Centered — zero tilt until the first real sample arrives.
        Self { x: 0.5, y: 0.5 }
    }
}

impl PointerSample {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }

    /// Signed tilt factors ∈ [-0.5, 0.5] around the viewport center.
    pub fn tilt(self) -> (f64, f64) {
        (self.x - 0.5, self.y - 0.5)
    }
}

// ───────────────────────────────────────── tween ─────────────

/// One in-flight scroll animation.
#[derive(Debug, Clone)]
struct ScrollTween {
    from: f64,
    to: f64,
    elapsed: f64,
    duration: f64,
    easing: Easing,
}

impl ScrollTween {
    fn sample(&self) -> f64 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        let eased = self.easing.apply(t);
        self.from + (self.to - self.from) * eased
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

// ───────────────────────────────────────── model ─────────────

/// Scroll state for the whole document.
///
/// Wheel/key input lands in `pending_delta`; [`ScrollModel::frame`] folds
/// the accumulated delta into a (re)targeted tween once per frame and
/// advances it by `dt` seconds.  When smoothing is off, input applies
/// instantly.
#[derive(Debug, Clone)]
pub struct ScrollModel {
    offset: f64,
    max_scroll: f64,
    tween: Option<ScrollTween>,
    pending_delta: f64,
    smooth: bool,
    duration: f64,
    easing: Easing,
}

impl ScrollModel {
    pub fn new(smooth: bool, duration: f64, easing: Easing) -> Self {
        Self {
            offset: 0.0,
            max_scroll: 0.0,
            tween: None,
            pending_delta: 0.0,
            smooth,
            duration: duration.max(0.0),
            easing,
        }
    }

    /// Update document/viewport geometry.  The current offset is clamped so
    /// a resize can never leave the page scrolled past its end.
    pub fn set_limits(&mut self, total_rows: f64, viewport_rows: f64) {
        self.max_scroll = (total_rows - viewport_rows).max(0.0);
        self.offset = self.offset.min(self.max_scroll);
        if let Some(ref mut tw) = self.tween {
            tw.to = tw.to.clamp(0.0, self.max_scroll);
        }
    }

    pub fn set_smooth(&mut self, smooth: bool) {
        self.smooth = smooth;
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration.max(0.0);
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Current interpolated offset in rows.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn max_scroll(&self) -> f64 {
        self.max_scroll
    }

    /// Final offset once any in-flight tween settles.
    pub fn target(&self) -> f64 {
        self.tween.as_ref().map_or(self.offset, |t| t.to)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some() || self.pending_delta != 0.0
    }

    /// Queue a relative scroll.  Multiple calls within one frame accumulate.
    pub fn scroll_by(&mut self, delta: f64) {
        self.pending_delta += delta;
    }

    /// Queue an absolute scroll.
    pub fn scroll_to(&mut self, target: f64) {
        self.pending_delta = 0.0;
        let target = target.clamp(0.0, self.max_scroll);
        if !self.smooth || self.duration <= 0.0 {
            self.jump_to(target);
            return;
        }
        if (target - self.offset).abs() < f64::EPSILON {
            self.tween = None;
            return;
        }
        self.retarget(target);
    }

    /// Jump without animation (used by reduced motion and tests).
    pub fn jump_to(&mut self, target: f64) {
        self.offset = target.clamp(0.0, self.max_scroll);
        self.tween = None;
        self.pending_delta = 0.0;
    }

    /// Drop any in-flight animation, holding the current position.
    pub fn cancel(&mut self) {
        self.tween = None;
        self.pending_delta = 0.0;
    }

    /// Advance one frame: fold pending input into the tween, then move it
    /// forward by `dt` seconds.  Returns the offset to paint this frame.
    pub fn frame(&mut self, dt: f64) -> f64 {
        if self.pending_delta != 0.0 {
            let target = (self.target() + self.pending_delta).clamp(0.0, self.max_scroll);
            self.pending_delta = 0.0;

            if !self.smooth || self.duration <= 0.0 {
                self.offset = target;
                self.tween = None;
            } else if (target - self.offset).abs() >= f64::EPSILON {
                self.retarget(target);
            } else {
                self.tween = None;
            }
        }

        if let Some(ref mut tw) = self.tween {
            tw.elapsed += dt.max(0.0);
            if tw.is_done() {
                self.offset = tw.to.clamp(0.0, self.max_scroll);
                self.tween = None;
            } else {
                self.offset = tw.sample().clamp(0.0, self.max_scroll);
            }
        }

        self.offset
    }

    /// Start a tween from the current interpolated position.  An in-flight
    /// animation is cancelled where it stands, so chained wheel events glide
    /// instead of rewinding.
    fn retarget(&mut self, target: f64) {
        self.tween = Some(ScrollTween {
            from: self.offset,
            to: target,
            elapsed: 0.0,
            duration: self.duration,
            easing: self.easing,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_linear_inside_the_region() {
        assert_eq!(region_progress(1000.0, 2000.0, 1500.0), 0.5);
        assert_eq!(region_progress(1000.0, 2000.0, 1000.0), 0.0);
        assert_eq!(region_progress(1000.0, 2000.0, 2000.0), 1.0);
    }

    #[test]
    fn progress_clamps_outside_the_region() {
        assert_eq!(region_progress(1000.0, 2000.0, 0.0), 0.0);
        assert_eq!(region_progress(1000.0, 2000.0, 9000.0), 1.0);
    }

    #[test]
    fn degenerate_region_is_fully_revealed() {
        // end == start and end < start both report 1.0, no division error.
        assert_eq!(region_progress(1000.0, 1000.0, 500.0), 1.0);
        assert_eq!(region_progress(1000.0, 900.0, 500.0), 1.0);
    }

    #[test]
    fn band_rule_resolves_against_the_viewport() {
        // Section top at row 200, viewport 100 rows tall.
        let (start, end) = SpanRule::Band {
            enter_at: 1.0,
            complete_at: 0.5,
        }
        .resolve(200.0, 40.0, 100.0);
        assert_eq!(start, 100.0); // top meets viewport bottom
        assert_eq!(end, 150.0); // top meets viewport middle
    }

    #[test]
    fn traverse_rule_spans_the_full_transit() {
        let (start, end) = SpanRule::Traverse.resolve(200.0, 40.0, 100.0);
        assert_eq!(start, 100.0);
        assert_eq!(end, 240.0);
    }

    #[test]
    fn pointer_sample_clamps_and_centers() {
        let p = PointerSample::new(1.5, -0.2);
        assert_eq!(p, PointerSample { x: 1.0, y: 0.0 });
        assert_eq!(PointerSample::default().tilt(), (0.0, 0.0));
    }

    #[test]
    fn instant_scroll_when_smoothing_is_off() {
        let mut sc = ScrollModel::new(false, 0.3, Easing::ExpoOut);
        sc.set_limits(500.0, 100.0);
        sc.scroll_by(50.0);
        assert_eq!(sc.frame(0.016), 50.0);
        assert!(!sc.is_animating());
    }

    #[test]
    fn wheel_deltas_batch_within_a_frame() {
        let mut sc = ScrollModel::new(true, 0.3, Easing::Linear);
        sc.set_limits(500.0, 100.0);
        sc.scroll_by(10.0);
        sc.scroll_by(10.0);
        sc.scroll_by(10.0);
        sc.frame(0.0);
        assert_eq!(sc.target(), 30.0);
    }

    #[test]
    fn tween_interpolates_and_settles() {
        let mut sc = ScrollModel::new(true, 0.2, Easing::Linear);
        sc.set_limits(500.0, 100.0);
        sc.scroll_by(100.0);
        let mid = sc.frame(0.1);
        assert!(mid > 0.0 && mid < 100.0, "mid-flight offset {mid}");
        sc.frame(0.2);
        assert_eq!(sc.offset(), 100.0);
        assert!(!sc.is_animating());
    }

    #[test]
    fn retarget_chains_from_the_interpolated_position() {
        let mut sc = ScrollModel::new(true, 0.2, Easing::Linear);
        sc.set_limits(1000.0, 100.0);
        sc.scroll_by(100.0);
        sc.frame(0.1); // halfway → offset ≈ 50
        let mid = sc.offset();
        sc.scroll_by(100.0); // retarget to 200 from wherever we are
        sc.frame(0.0);
        assert_eq!(sc.target(), 200.0);
        assert!((sc.offset() - mid).abs() < 1e-9, "no jump on retarget");
    }

    #[test]
    fn offsets_clamp_to_document_bounds() {
        let mut sc = ScrollModel::new(false, 0.0, Easing::Linear);
        sc.set_limits(150.0, 100.0);
        sc.scroll_by(1000.0);
        assert_eq!(sc.frame(0.016), 50.0);
        sc.scroll_by(-1000.0);
        assert_eq!(sc.frame(0.016), 0.0);
        // Content shorter than the viewport cannot scroll at all.
        sc.set_limits(80.0, 100.0);
        assert_eq!(sc.max_scroll(), 0.0);
    }

    #[test]
    fn resize_clamps_a_scrolled_page() {
        let mut sc = ScrollModel::new(false, 0.0, Easing::Linear);
        sc.set_limits(500.0, 100.0);
        sc.jump_to(400.0);
        sc.set_limits(500.0, 300.0); // taller viewport → less scroll room
        assert_eq!(sc.offset(), 200.0);
    }
}
