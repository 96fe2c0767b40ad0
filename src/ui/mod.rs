//! Terminal user interface.
//!
//! Rendering and key handling for the palette overlay, plus the shared text
//! input and theme.

mod input;
mod palette_view;
pub mod theme;

pub use input::TextInput;
pub use palette_view::{PaletteAction, PaletteView};
pub use theme::Theme;
