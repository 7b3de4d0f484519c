//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use crate::core::easing::Easing;

use super::state::{ActiveView, AppState};

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle — reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Toggle {
        label: "Smooth Scrolling",
        get: |s| s.config.smooth_scroll,
        set: |s, v| {
            s.config.smooth_scroll = v;
            let _ = s.config.save();
            s.apply_motion_settings();
        },
    },
    SettingsItem::Toggle {
        label: "Reduced Motion",
        get: |s| s.config.reduced_motion,
        set: |s, v| {
            s.config.reduced_motion = v;
            let _ = s.config.save();
            s.apply_motion_settings();
            s.status_message = Some(if v {
                "Reduced motion: animations snap to their end state".into()
            } else {
                "Reduced motion off".into()
            });
        },
    },
    SettingsItem::Toggle {
        label: "Pointer Tilt",
        get: |s| s.config.pointer_tilt,
        set: |s, v| {
            s.config.pointer_tilt = v;
            let _ = s.config.save();
        },
    },
    SettingsItem::Cycle {
        label: "Easing",
        value: |s| s.config.easing.label().to_string(),
        cycle: |s| {
            let idx = Easing::ALL
                .iter()
                .position(|e| *e == s.config.easing)
                .unwrap_or(0);
            s.config.easing = Easing::ALL[(idx + 1) % Easing::ALL.len()];
            let _ = s.config.save();
            s.apply_motion_settings();
            s.status_message = Some(format!("Easing: {}", s.config.easing.label()));
        },
    },
    SettingsItem::Cycle {
        label: "Scroll Duration",
        value: |s| format!("{}ms", s.config.scroll_ms),
        cycle: |s| {
            const DURATIONS: &[u64] = &[200, 300, 400, 600, 800, 1200];
            let current = s.config.scroll_ms;
            let idx = DURATIONS.iter().position(|&d| d == current).unwrap_or(2);
            s.config.scroll_ms = DURATIONS[(idx + 1) % DURATIONS.len()];
            let _ = s.config.save();
            s.apply_motion_settings();
        },
    },
    SettingsItem::Cycle {
        label: "Slide Duration",
        value: |s| format!("{}ms", s.config.slide_ms),
        cycle: |s| {
            const DURATIONS: &[u64] = &[500, 650, 800];
            let current = s.config.slide_ms;
            let idx = DURATIONS.iter().position(|&d| d == current).unwrap_or(1);
            s.config.slide_ms = DURATIONS[(idx + 1) % DURATIONS.len()];
            let _ = s.config.save();
            s.apply_motion_settings();
        },
    },
    SettingsItem::Cycle {
        label: "Frame Rate",
        value: |s| format!("{} fps", s.config.fps),
        cycle: |s| {
            const RATES: &[u64] = &[30, 60, 120];
            let current = s.config.fps;
            let idx = RATES.iter().position(|&r| r == current).unwrap_or(1);
            s.config.fps = RATES[(idx + 1) % RATES.len()];
            let _ = s.config.save();
            s.status_message = Some(format!(
                "Frame rate: {} fps (takes effect on restart)",
                s.config.fps
            ));
        },
    },
];
