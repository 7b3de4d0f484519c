//! Easing curves for reveal and scroll animations.
//!
//! Every curve maps [0, 1] → [0, 1], is monotonic, and hits the endpoints
//! exactly.  Input outside the unit interval is clamped first, so callers
//! can feed raw progress without pre-checking.

/// Available easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// `1 - (1-t)³` — gentle settle.
    #[default]
    CubicOut,
    /// `1 - (1-t)⁵` — harder settle.
    QuinticOut,
    /// `1 - 2^(-10t)` — fast start, long tail.
    ExpoOut,
    /// `t²(3 - 2t)` — symmetric ease in/out.
    SmoothStep,
}

impl Easing {
    /// Ordered list of all curves (used by the settings menu).
    pub const ALL: &[Easing] = &[
        Easing::Linear,
        Easing::CubicOut,
        Easing::QuinticOut,
        Easing::ExpoOut,
        Easing::SmoothStep,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Easing::Linear => "Linear",
            Easing::CubicOut => "Cubic Out",
            Easing::QuinticOut => "Quintic Out",
            Easing::ExpoOut => "Expo Out",
            Easing::SmoothStep => "Smooth Step",
        }
    }

    /// Name used in the config file.
    pub fn config_name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::CubicOut => "cubic",
            Easing::QuinticOut => "quintic",
            Easing::ExpoOut => "expo",
            Easing::SmoothStep => "smoothstep",
        }
    }

    pub fn from_config_name(s: &str) -> Option<Self> {
        match s {
            "linear" => Some(Easing::Linear),
            "cubic" => Some(Easing::CubicOut),
            "quintic" => Some(Easing::QuinticOut),
            "expo" => Some(Easing::ExpoOut),
            "smoothstep" => Some(Easing::SmoothStep),
            _ => None,
        }
    }

    /// Apply the curve to a progress value.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::QuinticOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv * inv * inv
            }
            Easing::ExpoOut => {
                // 2^(-10t) never quite reaches zero — force the endpoint.
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * t)
                }
            }
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for &e in Easing::ALL {
            assert_eq!(e.apply(0.0), 0.0, "{e:?} at t=0");
            assert_eq!(e.apply(1.0), 1.0, "{e:?} at t=1");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for &e in Easing::ALL {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = e.apply(i as f64 / 100.0);
                assert!(v >= prev, "{e:?} not monotonic at i={i}");
                prev = v;
            }
        }
    }

    #[test]
    fn input_is_clamped() {
        for &e in Easing::ALL {
            assert_eq!(e.apply(-3.5), 0.0);
            assert_eq!(e.apply(42.0), 1.0);
        }
    }

    #[test]
    fn config_names_round_trip() {
        for &e in Easing::ALL {
            assert_eq!(Easing::from_config_name(e.config_name()), Some(e));
        }
        assert_eq!(Easing::from_config_name("bounce"), None);
    }
}
