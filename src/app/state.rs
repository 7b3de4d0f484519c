//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use crate::config::AppConfig;
use crate::core::{
    carousel::Carousel,
    deck::{Deck, PageLayout, SectionKind},
    pin::PinnedRegion,
    scroll::{PointerSample, ScrollModel},
};

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Deck,
    SettingsMenu,
    ControlsSubmenu,
}

/// Per-section animation state.
///
/// The `regions` vec is index-aligned with `deck.sections` and never
/// reordered — item and section indices are identity for the lifetime of
/// the deck.
pub struct RegionState {
    /// Raw reveal progress ∈ [0, 1], written once per frame by the tracker.
    pub progress: f64,
    /// Pin machine for showcase sections.
    pub pin: Option<PinnedRegion>,
    /// Sequencer for carousel sections.
    pub carousel: Option<Carousel>,
}

/// Top-level application state.
pub struct AppState {
    /// The deck being presented.
    pub deck: Deck,
    /// Document geometry for the current viewport (re-derived on resize).
    pub layout: PageLayout,
    /// The single scroll read model.  Only the tracker mutates it.
    pub scroll: ScrollModel,
    /// Per-section animation state, index-aligned with `deck.sections`.
    pub regions: Vec<RegionState>,
    /// Latest normalized pointer sample (overwritten continuously).
    pub pointer: PointerSample,
    /// Terminal size in cells.
    pub viewport: (u16, u16),
    /// User-configurable keybindings and motion settings.
    pub config: AppConfig,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Currently highlighted item in the controls submenu.
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for the user to press
    /// a key to rebind the action at `controls_selected`.
    pub awaiting_rebind: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Monotonic frame counter (drives HUD pulses).
    pub frame: u64,
}

impl AppState {
    pub fn new(deck: Deck, config: AppConfig) -> Self {
        let regions = deck
            .sections
            .iter()
            .map(|section| RegionState {
                progress: 0.0,
                pin: (section.kind == SectionKind::Showcase).then(PinnedRegion::new),
                carousel: (section.kind == SectionKind::Carousel).then(|| {
                    Carousel::new(section.items.len(), config.slide_duration(), config.easing)
                }),
            })
            .collect();

        Self {
            layout: deck.layout(0),
            scroll: ScrollModel::new(
                config.smooth_scroll,
                config.scroll_duration(),
                config.easing,
            ),
            regions,
            pointer: PointerSample::default(),
            viewport: (0, 0),
            active_view: ActiveView::default(),
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
            status_message: None,
            should_quit: false,
            frame: 0,
            deck,
            config,
        }
    }

    /// Re-derive all viewport-relative geometry.  Called on the first draw
    /// and on every terminal resize.
    pub fn relayout(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        self.layout = self.deck.layout(height);
        self.scroll
            .set_limits(self.layout.total_rows, height as f64);
    }

    /// Push current motion settings into the animation models.  Called
    /// whenever the settings menu changes one of them.
    pub fn apply_motion_settings(&mut self) {
        self.scroll.set_smooth(self.config.smooth_scroll);
        self.scroll.set_duration(self.config.scroll_duration());
        self.scroll.set_easing(self.config.easing);
        if self.config.reduced_motion {
            // Whatever was mid-flight holds where it is; nothing animates.
            self.scroll.cancel();
        }
        for region in &mut self.regions {
            if let Some(ref mut carousel) = region.carousel {
                carousel.set_duration(self.config.slide_duration());
                carousel.set_easing(self.config.easing);
            }
        }
    }

    /// Index of the section covering the center of the viewport, if any.
    pub fn focused_section(&self) -> Option<usize> {
        let center = self.scroll.offset() + self.viewport.1 as f64 / 2.0;
        self.layout.sections.iter().position(|geo| {
            center >= geo.top && center < geo.top + geo.height + geo.pin_span
        })
    }

    /// The carousel the user is currently looking at (for Advance/Back).
    pub fn focused_carousel(&mut self) -> Option<&mut Carousel> {
        let idx = self.focused_section()?;
        self.regions[idx].carousel.as_mut()
    }
}
