//! Text rendering of the progress dialog and the floating status line

pub mod dialog;
pub mod glyphs;
pub mod terminal;

pub use dialog::{bar, dialog, status_line};
pub use glyphs::glyph;
pub use terminal::{Painter, fit_to_width};
