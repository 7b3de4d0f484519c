//! Viewport tracker runtime — the per-frame animation pipeline.
//!
//! Input handlers never recompute anything; they only queue deltas and
//! overwrite the latest pointer sample.  Once per rendered frame the main
//! loop calls [`advance_frame`], which runs the strict pipeline:
//! sample (fold input into the scroll model) → map (recompute every
//! region's progress and feed its state machines).  Painting is the third
//! phase and happens in the draw pass that follows.  Each region's
//! pipeline runs to completion before the next region's begins.

use tracing::debug;

use crate::core::pin::PinEvent;
use crate::core::scroll::region_progress;

use super::state::AppState;

/// Advance every animation model by `dt` seconds (one frame).
pub fn advance_frame(state: &mut AppState, dt: f64) {
    state.frame = state.frame.wrapping_add(1);

    // Phase 1 — sample.  However many wheel/key events arrived since the
    // last frame, the scroll offset is recomputed exactly once.
    let offset = state.scroll.frame(dt);

    // Phase 2 — map, region by region.
    let layout = &state.layout;
    let regions = &mut state.regions;
    for (idx, (geo, region)) in layout.sections.iter().zip(regions.iter_mut()).enumerate() {
        region.progress = region_progress(geo.start, geo.end, offset);

        if let Some(ref mut pin) = region.pin {
            match pin.observe(region.progress) {
                Some(PinEvent::Captured { progress }) => {
                    debug!(section = idx, progress, "pin captured");
                }
                Some(PinEvent::Released { forward }) => {
                    debug!(section = idx, forward, "pin released");
                }
                None => {}
            }
        }

        if let Some(ref mut carousel) = region.carousel {
            carousel.frame(dt);
        }
    }
}

/// True while any animation still needs frames.  The draw loop uses this
/// to decide whether a tick must trigger a repaint.
pub fn needs_frames(state: &AppState) -> bool {
    state.scroll.is_animating()
        || state
            .regions
            .iter()
            .any(|r| r.carousel.as_ref().is_some_and(|c| c.is_transitioning()))
}
