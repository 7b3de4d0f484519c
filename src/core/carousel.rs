//! Discrete carousel sequencing (non-scroll-bound decks of cards).
//!
//! Exactly one card is active at any time and at most one is leaving.
//! Advancing animates precisely two cards — the outgoing one to its
//! leaving pose, the incoming one to the active pose — while every other
//! card is snapped straight to the waiting pose, not animated.  Only one
//! transition may be in flight: a new call cancels the current one at its
//! interpolated position and continues from there, no queueing.

use super::easing::Easing;
use super::reveal::VisualState;

// ───────────────────────────────────────── roles & poses ─────

/// Discrete role of a card.  No card ever holds two roles at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Active,
    Leaving,
    Waiting,
}

/// Resting poses for the three roles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselPoses {
    pub active: VisualState,
    pub leaving: VisualState,
    pub waiting: VisualState,
}

impl Default for CarouselPoses {
    /// Stacked-deck look: the active card front and center, the leaving
    /// card sliding up and out, waiting cards peeking from below.
    fn default() -> Self {
        Self {
            active: VisualState::REST,
            leaving: VisualState {
                opacity: 0.0,
                dy: -8.0,
                dx: 0.0,
                scale: 0.9,
                tilt: -1.0,
            },
            waiting: VisualState {
                opacity: 0.4,
                dy: 3.0,
                dx: 0.0,
                scale: 0.9,
                tilt: 1.0,
            },
        }
    }
}

// ───────────────────────────────────────── flight ────────────

/// The single in-flight transition.
#[derive(Debug, Clone)]
struct Flight {
    entering: usize,
    leaving: usize,
    /// Poses the two cards were in when the flight started — the waiting /
    /// active anchors normally, or mid-flight poses after a cancellation.
    entering_from: VisualState,
    leaving_from: VisualState,
    elapsed: f64,
    duration: f64,
}

impl Flight {
    fn t(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

// ───────────────────────────────────────── carousel ──────────

/// Sequencer for one carousel section.
#[derive(Debug, Clone)]
pub struct Carousel {
    count: usize,
    active: usize,
    /// +1 after `advance`, -1 after `back`, 0 before any transition.
    direction: i8,
    flight: Option<Flight>,
    duration: f64,
    easing: Easing,
    poses: CarouselPoses,
}

impl Carousel {
    /// `duration` is the per-transition budget in seconds.
    pub fn new(count: usize, duration: f64, easing: Easing) -> Self {
        Self {
            count,
            active: 0,
            direction: 0,
            flight: None,
            duration: duration.max(0.0),
            easing,
            poses: CarouselPoses::default(),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn direction(&self) -> i8 {
        self.direction
    }

    pub fn is_transitioning(&self) -> bool {
        self.flight.is_some()
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration.max(0.0);
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Move to the next card, wrapping at the end.
    pub fn advance(&mut self) {
        if self.count == 0 {
            return;
        }
        let next = (self.active + 1) % self.count;
        self.start(next, 1);
    }

    /// Move to the previous card, wrapping at the start.
    pub fn back(&mut self) {
        if self.count == 0 {
            return;
        }
        let prev = (self.active + self.count - 1) % self.count;
        self.start(prev, -1);
    }

    /// Jump to a specific card.  Out-of-range and same-index requests are
    /// no-ops — a broken remote must not break the deck.
    pub fn go_to(&mut self, index: usize) {
        if index >= self.count || index == self.active {
            return;
        }
        let dir = if index > self.active { 1 } else { -1 };
        self.start(index, dir);
    }

    /// Advance the in-flight transition by `dt` seconds.  Returns true
    /// while animation work remains.
    pub fn frame(&mut self, dt: f64) -> bool {
        if let Some(ref mut flight) = self.flight {
            flight.elapsed += dt.max(0.0);
            if flight.elapsed >= flight.duration {
                // Flight done — the leaving card drops to Waiting (snapped).
                self.flight = None;
            }
        }
        self.flight.is_some()
    }

    /// Current role of a card.
    pub fn role(&self, index: usize) -> Role {
        if index == self.active {
            Role::Active
        } else if self.flight.as_ref().is_some_and(|f| f.leaving == index) {
            Role::Leaving
        } else {
            Role::Waiting
        }
    }

    /// Current interpolated pose of a card.
    ///
    /// Cards outside the in-flight pair sit exactly on their role's anchor
    /// pose — they are never animated.
    pub fn state_of(&self, index: usize) -> VisualState {
        if let Some(ref flight) = self.flight {
            let t = self.easing.apply(flight.t());
            if index == flight.entering {
                return VisualState::lerp(&flight.entering_from, &self.poses.active, t);
            }
            if index == flight.leaving {
                return VisualState::lerp(&flight.leaving_from, &self.poses.leaving, t);
            }
        }
        if index == self.active {
            self.poses.active
        } else {
            self.poses.waiting
        }
    }

    /// Begin a transition to `next`.  Sampling the two cards' poses
    /// *before* replacing the flight is what makes cancellation seamless:
    /// an interrupted card continues from wherever it was, and the card
    /// displaced from the old flight snaps to Waiting.
    fn start(&mut self, next: usize, direction: i8) {
        if next == self.active {
            // Single-card deck wrapping onto itself.
            return;
        }
        let entering_from = self.state_of(next);
        let leaving_from = self.state_of(self.active);
        let leaving = self.active;

        self.active = next;
        self.direction = direction;

        if self.duration <= 0.0 {
            // Reduced motion: both cards snap to their new anchors.
            self.flight = None;
            return;
        }

        self.flight = Some(Flight {
            entering: next,
            leaving,
            entering_from,
            leaving_from,
            elapsed: 0.0,
            duration: self.duration,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(count: usize) -> Carousel {
        Carousel::new(count, 1.0, Easing::Linear)
    }

    #[test]
    fn advance_wraps_at_item_count() {
        let mut c = carousel(4);
        let mut seen = Vec::new();
        for _ in 0..5 {
            c.advance();
            seen.push(c.active());
        }
        assert_eq!(seen, vec![1, 2, 3, 0, 1]);
    }

    #[test]
    fn back_wraps_the_other_way() {
        let mut c = carousel(3);
        c.back();
        assert_eq!(c.active(), 2);
        assert_eq!(c.direction(), -1);
    }

    #[test]
    fn exactly_one_active_after_any_sequence() {
        let mut c = carousel(4);
        c.advance();
        c.frame(0.25);
        c.go_to(3);
        c.frame(0.1);
        c.back();
        c.advance();
        let actives = (0..4).filter(|&i| c.role(i) == Role::Active).count();
        assert_eq!(actives, 1);
        let leavings = (0..4).filter(|&i| c.role(i) == Role::Leaving).count();
        assert!(leavings <= 1);
    }

    #[test]
    fn transition_animates_exactly_two_cards() {
        let mut c = carousel(4);
        c.advance(); // 0 → 1
        c.frame(0.5);
        let poses = CarouselPoses::default();
        // Cards 2 and 3 sit exactly on the waiting anchor — snapped.
        assert_eq!(c.state_of(2), poses.waiting);
        assert_eq!(c.state_of(3), poses.waiting);
        // Cards 0 and 1 are mid-flight, off their anchors.
        assert_ne!(c.state_of(0), poses.leaving);
        assert_ne!(c.state_of(1), poses.active);
    }

    #[test]
    fn cancellation_continues_from_the_interpolated_pose() {
        let mut c = carousel(3);
        c.advance(); // 0 → 1
        c.frame(0.4);
        let mid = c.state_of(1); // the entering card, 40% of the way in
        c.advance(); // cancel mid-flight: 1 → 2
        // Card 1 is now leaving and starts exactly where it was.
        assert_eq!(c.role(1), Role::Leaving);
        assert_eq!(c.state_of(1), mid);
        // Card 0, displaced from the old flight, snapped to waiting.
        assert_eq!(c.state_of(0), CarouselPoses::default().waiting);
    }

    #[test]
    fn flight_settles_on_the_anchors() {
        let mut c = carousel(3);
        c.advance();
        assert!(c.frame(0.5));
        assert!(!c.frame(0.6)); // past the 1.0s budget
        let poses = CarouselPoses::default();
        assert_eq!(c.state_of(1), poses.active);
        // The leaving card snapped to waiting once the flight ended.
        assert_eq!(c.state_of(0), poses.waiting);
        assert_eq!(c.role(0), Role::Waiting);
    }

    #[test]
    fn zero_duration_snaps_without_a_flight() {
        let mut c = Carousel::new(3, 0.0, Easing::Linear);
        c.advance();
        assert!(!c.is_transitioning());
        assert_eq!(c.state_of(1), CarouselPoses::default().active);
    }

    #[test]
    fn empty_and_out_of_range_requests_are_no_ops() {
        let mut c = carousel(0);
        c.advance();
        c.go_to(2);
        assert_eq!(c.active(), 0);
        assert!(!c.is_transitioning());

        let mut c = carousel(3);
        c.go_to(7);
        c.go_to(0);
        assert_eq!(c.active(), 0);
        assert!(!c.is_transitioning());
    }
}
