//! Color palette.

use ratatui::style::Color;

/// Semantic color assignments used by every widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Panel backgrounds
    pub bg: Color,
    /// Main text
    pub fg: Color,
    /// Status bar and tab bar background
    pub accented_bg: Color,
    /// Focused borders, active tab, headings
    pub accented_fg: Color,
    /// Tree selection and cursor cell background
    pub selected_bg: Color,
    pub selected_fg: Color,
    /// Line numbers, unfocused borders, secondary text
    pub disabled: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    pub const DEFAULT: Theme = Theme {
        bg: Color::Reset,
        fg: Color::Reset,
        accented_bg: Color::DarkGray,
        accented_fg: Color::Cyan,
        selected_bg: Color::Blue,
        selected_fg: Color::White,
        disabled: Color::Gray,
        success: Color::Green,
        warning: Color::Yellow,
        error: Color::Red,
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::DEFAULT
    }
}
