//! Color palette used by rendering code.

use ratatui::style::Color;

/// Application theme palette.
///
/// All colors are provided as [`ratatui::style::Color`] and are suitable for
/// direct use with widgets and styles.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Primary background color for the canvas.
    pub base: Color,
    /// Subtle surface color for the selected row.
    pub surface1: Color,
    /// Muted border color.
    pub overlay1: Color,
    /// Secondary muted text (descriptions, dates).
    pub overlay2: Color,
    /// Primary foreground text color.
    pub text: Color,
    /// Accent for headings and active parameters.
    pub mauve: Color,
    /// Accent for category labels.
    pub sapphire: Color,
    /// Success/positive state color.
    pub green: Color,
    /// Warning/attention state color.
    pub yellow: Color,
    /// Error/danger state color.
    pub red: Color,
}

/// Built-in dark palette (Catppuccin Mocha).
const MOCHA: Theme = Theme {
    base: Color::Rgb(30, 30, 46),        // #1e1e2e
    surface1: Color::Rgb(69, 71, 90),    // #45475a
    overlay1: Color::Rgb(127, 132, 156), // #7f849c
    overlay2: Color::Rgb(147, 153, 178), // #9399b2
    text: Color::Rgb(205, 214, 244),     // #cdd6f4
    mauve: Color::Rgb(203, 166, 247),    // #cba6f7
    sapphire: Color::Rgb(116, 199, 236), // #74c7ec
    green: Color::Rgb(166, 227, 161),    // #a6e3a1
    yellow: Color::Rgb(249, 226, 175),   // #f9e2af
    red: Color::Rgb(243, 139, 168),      // #f38ba8
};

/// Active palette.
#[must_use]
pub const fn theme() -> Theme {
    MOCHA
}
