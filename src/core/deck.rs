//! Deck content model, document layout, and the deck file format.
//!
//! A deck is an ordered list of sections; each section owns an ordered
//! list of items.  Item order is stable for the lifetime of the deck —
//! indices double as identity everywhere else in the engine.  Section
//! heights are declared in viewport-height multiples, so the whole
//! document re-lays-out when the terminal is resized.

use std::path::Path;

use thiserror::Error;

use super::scroll::SpanRule;

// ───────────────────────────────────────── sections ──────────

/// The visual treatments a section can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Full-screen opener: oversized title, kicker line, scroll hint.
    Billboard,
    /// Cards in columns, revealed item by item as the section enters.
    Grid,
    /// Vertical milestone list revealed across the section's transit.
    Timeline,
    /// Pinned stage: the section holds the viewport while cards fly
    /// through depth, one per span of scroll.
    Showcase,
    /// Discrete stacked-card deck driven by key presses, not scroll.
    Carousel,
}

impl SectionKind {
    /// Parse the name used in deck-file headers (`[grid]`, `[showcase]`, …).
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "billboard" => Some(SectionKind::Billboard),
            "grid" => Some(SectionKind::Grid),
            "timeline" => Some(SectionKind::Timeline),
            "showcase" => Some(SectionKind::Showcase),
            "carousel" => Some(SectionKind::Carousel),
            _ => None,
        }
    }
}

/// One animatable unit: a card, a milestone, a quote.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub title: String,
    pub body: String,
    /// Free-form side label: a year, a client role, a tech tag.
    pub tag: Option<String>,
}

/// One section of the deck.
#[derive(Debug, Clone)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    /// Small overline label above the title.
    pub kicker: Option<String>,
    pub items: Vec<Item>,
    /// Resting height in viewport-heights.
    pub height_vh: f64,
    /// Showcase only: scroll span per item, in viewport-heights.
    pub span_per_item_vh: f64,
    /// Reveal window overlap for grid/timeline items (0 = equal split).
    pub stagger: f64,
    /// How the reveal window maps onto scroll offsets.
    pub rule: SpanRule,
}

impl Section {
    /// A section with the house defaults for its kind.
    pub fn new(kind: SectionKind, title: impl Into<String>) -> Self {
        let (height_vh, rule) = match kind {
            // The opener sits at the top fully revealed and fades out
            // across its transit as the user scrolls away.
            SectionKind::Billboard => (1.0, SpanRule::Traverse),
            SectionKind::Grid => (1.2, SpanRule::DEFAULT_BAND),
            SectionKind::Timeline => (1.6, SpanRule::Traverse),
            SectionKind::Showcase => (1.0, SpanRule::DEFAULT_BAND),
            SectionKind::Carousel => (1.0, SpanRule::DEFAULT_BAND),
        };
        Self {
            kind,
            title: title.into(),
            kicker: None,
            items: Vec::new(),
            height_vh,
            span_per_item_vh: 1.5,
            stagger: 0.1,
            rule,
        }
    }
}

/// A full deck.
#[derive(Debug, Clone)]
pub struct Deck {
    pub title: String,
    pub sections: Vec<Section>,
}

// ───────────────────────────────────────── layout ────────────

/// Resolved document geometry for one section (rows).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionGeometry {
    /// Document row of the section's top edge.
    pub top: f64,
    /// Painted height.
    pub height: f64,
    /// Extra scroll consumed while pinned (0 for unpinned kinds).
    pub pin_span: f64,
    /// Scroll offset where reveal progress starts.
    pub start: f64,
    /// Scroll offset where reveal progress completes.
    pub end: f64,
}

/// The whole document, laid out for one viewport size.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub sections: Vec<SectionGeometry>,
    pub total_rows: f64,
}

/// Sections shorter than this are unreadable; heights clamp up to it
/// (except on degenerate zero-row viewports, where everything is zero).
const MIN_SECTION_ROWS: f64 = 8.0;

impl Deck {
    /// Lay the deck out against a viewport height.  Called on load and on
    /// every resize — start/end boundaries are viewport-relative and must
    /// be re-resolved.
    pub fn layout(&self, viewport_rows: u16) -> PageLayout {
        let vh = viewport_rows as f64;
        let mut sections = Vec::with_capacity(self.sections.len());
        let mut top = 0.0;

        for section in &self.sections {
            let height = if vh == 0.0 {
                0.0
            } else {
                (section.height_vh * vh).max(MIN_SECTION_ROWS)
            };
            let pin_span = if section.kind == SectionKind::Showcase {
                section.items.len() as f64 * section.span_per_item_vh * vh
            } else {
                0.0
            };
            // A pinned stage's progress runs across its own span; everything
            // else reveals across the window its rule describes.
            let (start, end) = if section.kind == SectionKind::Showcase {
                (top, top + pin_span)
            } else {
                section.rule.resolve(top, height, vh)
            };

            sections.push(SectionGeometry {
                top,
                height,
                pin_span,
                start,
                end,
            });
            top += height + pin_span;
        }

        PageLayout {
            sections,
            total_rows: top,
        }
    }
}

// ───────────────────────────────────────── deck files ────────

/// Errors loading a deck file.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read deck file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: unknown section kind `{kind}`")]
    UnknownKind { line: usize, kind: String },
    #[error("line {line}: `{key}` appears before any [section] header")]
    OrphanKey { line: usize, key: String },
    #[error("deck has no sections")]
    Empty,
}

impl Deck {
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse the line-oriented deck format:
    ///
    /// ```text
    /// title = My Deck
    /// [grid]
    /// title = Services
    /// kicker = What we do
    /// height = 1.4
    /// item = Card Title | body text | tag
    /// ```
    ///
    /// Unknown keys and unparseable numeric values are ignored (the
    /// section keeps its defaults); unknown section kinds are errors.
    pub fn parse(text: &str) -> Result<Self, DeckError> {
        let mut deck_title = String::from("Untitled Deck");
        let mut sections: Vec<Section> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let kind_key = header.trim().to_lowercase();
                let Some(kind) = SectionKind::from_config_key(&kind_key) else {
                    return Err(DeckError::UnknownKind {
                        line: line_no,
                        kind: kind_key,
                    });
                };
                sections.push(Section::new(kind, ""));
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            let Some(section) = sections.last_mut() else {
                // Only the deck title may appear before the first header.
                if key == "title" {
                    deck_title = value.to_string();
                    continue;
                }
                return Err(DeckError::OrphanKey {
                    line: line_no,
                    key: key.to_string(),
                });
            };

            match key {
                "title" => section.title = value.to_string(),
                "kicker" => section.kicker = Some(value.to_string()),
                "height" => {
                    if let Ok(v) = value.parse::<f64>() {
                        section.height_vh = v.clamp(0.25, 8.0);
                    }
                }
                "span" => {
                    if let Ok(v) = value.parse::<f64>() {
                        section.span_per_item_vh = v.clamp(0.25, 4.0);
                    }
                }
                "stagger" => {
                    if let Ok(v) = value.parse::<f64>() {
                        section.stagger = v.clamp(0.0, 0.5);
                    }
                }
                "reveal" => match value {
                    "traverse" => section.rule = SpanRule::Traverse,
                    "band" => section.rule = SpanRule::DEFAULT_BAND,
                    _ => {}
                },
                "item" => {
                    let mut parts = value.splitn(3, '|').map(str::trim);
                    let title = parts.next().unwrap_or_default().to_string();
                    let body = parts.next().unwrap_or_default().to_string();
                    let tag = parts.next().filter(|t| !t.is_empty()).map(str::to_string);
                    section.items.push(Item { title, body, tag });
                }
                _ => {}
            }
        }

        if sections.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(Deck {
            title: deck_title,
            sections,
        })
    }

    /// Built-in sample deck, used by `--demo` and when no path is given.
    pub fn sample() -> Self {
        Deck::parse(SAMPLE_DECK).expect("sample deck is well-formed")
    }
}

/// Placeholder content exercising every section kind.
const SAMPLE_DECK: &str = "\
title = Scrolldeck Tour

[billboard]
title = MOTION, ONE ROW AT A TIME
kicker = A scroll-driven deck
item = Scroll with the wheel or j/k | The page reveals itself as you go

[grid]
title = What a deck can hold
kicker = Building blocks
height = 1.4
item = Billboards | Full-screen openers with a kicker and a hint | 01
item = Card Grids | Columns of cards that rise in one by one | 02
item = Timelines | Milestones revealed across a long transit | 03
item = Showcases | A pinned stage with cards flying through depth | 04
item = Carousels | Stacked quotes advanced with the space bar | 05
item = Plain Text | Anything the line format can carry | 06

[showcase]
title = Selected Work
kicker = Pinned stage
item = Terminal Atlas | A map renderer for airgapped ops rooms | tui
item = Queue Lens | Live dashboards for batch pipelines | infra
item = Ledger Mirror | Reconciliation views for finance teams | data
item = Relay Board | Incident timelines for on-call rotations | ops

[timeline]
title = How it came together
kicker = Milestones
item = Prototype | A weekend spike proves rows can ease | 2023
item = Engine split | Pure core, thin adapters | 2024
item = Pinned stages | Scroll spans that hold the viewport | 2024
item = Public deck files | Plain text in, motion out | 2025

[carousel]
title = Field Notes
kicker = Heard in passing
item = It reads like a site but lives in my terminal | Platform Lead
item = The pinned showcase is the part everyone demos | Design Partner
item = Decks are just text files, so they live in git now | Staff Engineer
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_deck_parses_and_covers_every_kind() {
        let deck = Deck::sample();
        let kinds: Vec<_> = deck.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Billboard,
                SectionKind::Grid,
                SectionKind::Showcase,
                SectionKind::Timeline,
                SectionKind::Carousel,
            ]
        );
    }

    #[test]
    fn parse_reads_items_and_options() {
        let deck = Deck::parse(
            "title = T\n[grid]\ntitle = G\nheight = 2.0\nstagger = 0.2\nitem = A | a body | 9\nitem = B\n",
        )
        .unwrap();
        assert_eq!(deck.title, "T");
        let s = &deck.sections[0];
        assert_eq!(s.height_vh, 2.0);
        assert_eq!(s.stagger, 0.2);
        assert_eq!(s.items.len(), 2);
        assert_eq!(s.items[0].tag.as_deref(), Some("9"));
        assert_eq!(s.items[1].body, "");
        assert_eq!(s.items[1].tag, None);
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let err = Deck::parse("[hero]\n").unwrap_err();
        assert!(matches!(err, DeckError::UnknownKind { line: 1, .. }));
    }

    #[test]
    fn keys_before_a_header_are_rejected() {
        let err = Deck::parse("item = stray\n").unwrap_err();
        assert!(matches!(err, DeckError::OrphanKey { .. }));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(Deck::parse("# nothing\n"), Err(DeckError::Empty)));
    }

    #[test]
    fn invalid_numbers_keep_defaults() {
        let deck = Deck::parse("[grid]\nheight = tall\n").unwrap();
        assert_eq!(deck.sections[0].height_vh, 1.2);
    }

    #[test]
    fn layout_stacks_sections_and_adds_pin_spans() {
        let mut deck = Deck::sample();
        deck.sections.truncate(3); // billboard, grid, showcase
        let layout = deck.layout(40);

        let billboard = layout.sections[0];
        assert_eq!(billboard.top, 0.0);
        assert_eq!(billboard.height, 40.0);
        assert_eq!(billboard.pin_span, 0.0);

        let grid = layout.sections[1];
        assert_eq!(grid.top, 40.0);
        assert_eq!(grid.height, 1.4 * 40.0);

        let showcase = layout.sections[2];
        assert_eq!(showcase.top, grid.top + grid.height);
        // 4 items × 1.5 viewport-heights × 40 rows.
        assert_eq!(showcase.pin_span, 240.0);
        assert_eq!(showcase.start, showcase.top);
        assert_eq!(showcase.end, showcase.top + 240.0);
        assert_eq!(layout.total_rows, showcase.top + 40.0 + 240.0);
    }

    #[test]
    fn layout_boundaries_move_with_the_viewport() {
        let deck = Deck::parse("[grid]\nitem = a\n").unwrap();
        let small = deck.layout(20);
        let large = deck.layout(60);
        assert_ne!(small.sections[0].start, large.sections[0].start);
        assert!(large.sections[0].height > small.sections[0].height);
    }

    #[test]
    fn zero_viewport_degrades_to_an_empty_document() {
        let deck = Deck::sample();
        let layout = deck.layout(0);
        assert_eq!(layout.total_rows, 0.0);
    }
}
