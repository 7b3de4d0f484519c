//! Pinned-region state machine.
//!
//! A pinned section is held fixed in the viewport while its internal
//! progress runs 0 → 1 across a span of scroll offsets; once progress
//! reaches either end, normal scrolling resumes.  Transitions are driven
//! solely by progress crossing 0 or 1 — there is no external command to
//! pin or release.

/// Phases of the pin cycle:
/// `Unpinned → Pinning → Pinned → Unpinning → Unpinned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinPhase {
    /// Scrolling normally, progress at 0 or 1.
    #[default]
    Unpinned,
    /// Progress just entered (0, 1) — the hold begins this frame.
    Pinning,
    /// Held in place, internal progress advancing.
    Pinned,
    /// Progress just reached 0 or 1 — the hold releases this frame.
    Unpinning,
}

/// Pin lifecycle notifications, surfaced for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinEvent {
    /// The region locked to the viewport at the given progress.
    Captured { progress: f64 },
    /// The region released; `forward` is true when it completed at 1.
    Released { forward: bool },
}

/// Tracks one pinned region across frames.  The raw progress itself lives
/// with the region; this machine only follows its boundary crossings.
#[derive(Debug, Clone, Default)]
pub struct PinnedRegion {
    phase: PinPhase,
}

impl PinnedRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PinPhase {
        self.phase
    }

    /// True while the section must paint fixed in the viewport.
    pub fn held(&self) -> bool {
        matches!(self.phase, PinPhase::Pinning | PinPhase::Pinned)
    }

    /// Feed this frame's raw progress (already clamped by the tracker).
    /// Returns a [`PinEvent`] when the hold starts or ends.
    pub fn observe(&mut self, progress: f64) -> Option<PinEvent> {
        let progress = progress.clamp(0.0, 1.0);
        let inside = progress > 0.0 && progress < 1.0;
        let was = self.phase;

        self.phase = match (was, inside) {
            (PinPhase::Unpinned, true) => PinPhase::Pinning,
            (PinPhase::Unpinned, false) => PinPhase::Unpinned,
            (PinPhase::Pinning, true) => PinPhase::Pinned,
            (PinPhase::Pinned, true) => PinPhase::Pinned,
            (PinPhase::Pinning | PinPhase::Pinned, false) => PinPhase::Unpinning,
            // A release can be re-captured immediately when the user
            // scrolls back across the boundary within a frame or two.
            (PinPhase::Unpinning, true) => PinPhase::Pinning,
            (PinPhase::Unpinning, false) => PinPhase::Unpinned,
        };

        match (was, self.phase) {
            (PinPhase::Unpinned | PinPhase::Unpinning, PinPhase::Pinning) => {
                Some(PinEvent::Captured { progress })
            }
            (PinPhase::Pinning | PinPhase::Pinned, PinPhase::Unpinning) => {
                Some(PinEvent::Released {
                    forward: progress >= 1.0,
                })
            }
            _ => None,
        }
    }
}

/// Screen-space top of a pinned section.
///
/// While the scroll offset travels through the pin span the section's
/// visual top stays at 0; before the span it approaches from below, after
/// it it scrolls away upward.  `top`/`span` are document rows.
pub fn held_screen_top(top: f64, span: f64, offset: f64) -> f64 {
    let consumed = (offset - top).clamp(0.0, span.max(0.0));
    (top - offset) + consumed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases(seq: &[f64]) -> Vec<PinPhase> {
        let mut pin = PinnedRegion::new();
        seq.iter()
            .map(|&p| {
                pin.observe(p);
                pin.phase()
            })
            .collect()
    }

    #[test]
    fn full_forward_cycle() {
        assert_eq!(
            phases(&[0.0, 0.2, 0.5, 0.9, 1.0, 1.0]),
            vec![
                PinPhase::Unpinned,
                PinPhase::Pinning,
                PinPhase::Pinned,
                PinPhase::Pinned,
                PinPhase::Unpinning,
                PinPhase::Unpinned,
            ]
        );
    }

    #[test]
    fn backward_release_at_zero() {
        assert_eq!(
            phases(&[0.4, 0.1, 0.0, 0.0]),
            vec![
                PinPhase::Pinning,
                PinPhase::Pinned,
                PinPhase::Unpinning,
                PinPhase::Unpinned,
            ]
        );
    }

    #[test]
    fn recapture_after_release() {
        // Scroll past the end, then immediately back inside the span.
        assert_eq!(
            phases(&[0.5, 1.0, 0.8]),
            vec![PinPhase::Pinning, PinPhase::Unpinning, PinPhase::Pinning]
        );
    }

    #[test]
    fn events_fire_on_capture_and_release() {
        let mut pin = PinnedRegion::new();
        assert_eq!(pin.observe(0.0), None);
        assert_eq!(pin.observe(0.3), Some(PinEvent::Captured { progress: 0.3 }));
        assert_eq!(pin.observe(0.6), None);
        assert_eq!(pin.observe(1.0), Some(PinEvent::Released { forward: true }));
        assert_eq!(pin.observe(1.0), None);
    }

    #[test]
    fn held_only_inside_the_span() {
        let mut pin = PinnedRegion::new();
        pin.observe(0.0);
        assert!(!pin.held());
        pin.observe(0.5);
        assert!(pin.held());
        pin.observe(1.0);
        assert!(!pin.held());
    }

    #[test]
    fn screen_top_freezes_through_the_span() {
        // Section top at 100, span 200.
        assert_eq!(held_screen_top(100.0, 200.0, 40.0), 60.0); // approaching
        assert_eq!(held_screen_top(100.0, 200.0, 100.0), 0.0); // captured
        assert_eq!(held_screen_top(100.0, 200.0, 250.0), 0.0); // held
        assert_eq!(held_screen_top(100.0, 200.0, 300.0), 0.0); // releasing
        assert_eq!(held_screen_top(100.0, 200.0, 340.0), -40.0); // gone
    }
}
