//! Theme and styling configuration.

use ratatui::style::Color;

/// Color theme for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Primary background color.
    pub bg: Color,
    /// Accent for borders, prompts and the selection marker.
    pub accent: Color,
    /// Secondary text such as descriptions and key hints.
    pub muted: Color,
    /// Background of the highlighted row.
    pub highlight_bg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            bg: Color::Black,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            highlight_bg: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            bg: Color::White,
            accent: Color::Blue,
            muted: Color::Gray,
            highlight_bg: Color::Gray,
        }
    }

    /// Look up a theme by its config name. Unknown names fall back to dark.
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Whether this is the light theme.
    pub fn is_light(&self) -> bool {
        *self == Self::light()
    }

    /// The other theme.
    pub fn toggled(&self) -> Self {
        if self.is_light() {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
