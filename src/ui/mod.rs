//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* visual states and turns them into cells on
//! the terminal.  No scroll math happens here: widgets only project what
//! the frame pipeline already computed.

pub mod deck_widget;
pub mod fx;
pub mod hud;
pub mod layout;
pub mod popup;
pub mod theme;
