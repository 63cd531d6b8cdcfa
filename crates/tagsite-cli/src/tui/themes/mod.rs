//! Color theme
//!
//! A single dark palette. Every widget takes its colors from here so the
//! views never hard-code RGB values.

use ratatui::style::Color;

/// A complete theme definition
#[derive(Debug, Clone)]
pub struct Theme {
    // Core colors
    pub bg_color: Color,
    pub border_color: Color,
    pub title_color: Color,
    pub accent_color: Color,
    pub text_color: Color,
    pub success_color: Color,
    pub dim_color: Color,

    // Special colors
    pub warning_color: Color,
    pub error_color: Color,
    pub info_color: Color,

    // UI element colors
    pub selection_bg_color: Color,
    pub selection_fg_color: Color,
    pub input_bg_color: Color,
    pub input_placeholder_color: Color,
    pub status_bar_bg_color: Color,

    // Tag chips and stat bars
    pub chip_jp_color: Color,
    pub chip_kr_color: Color,
    pub bar_color: Color,
    pub link_color: Color,
}

impl Theme {
    /// The default dark theme
    pub fn krusty() -> Self {
        Self {
            bg_color: Color::Rgb(24, 24, 37),
            border_color: Color::Rgb(88, 91, 112),
            title_color: Color::Rgb(139, 233, 253),
            accent_color: Color::Rgb(189, 147, 249),
            text_color: Color::Rgb(203, 213, 225),
            success_color: Color::Rgb(80, 250, 123),
            dim_color: Color::Rgb(148, 163, 184),
            warning_color: Color::Rgb(255, 203, 107),
            error_color: Color::Rgb(255, 85, 85),
            info_color: Color::Rgb(139, 233, 253),
            selection_bg_color: Color::Rgb(51, 65, 85),
            selection_fg_color: Color::Rgb(203, 213, 225),
            input_bg_color: Color::Rgb(51, 65, 85),
            input_placeholder_color: Color::Rgb(100, 116, 139),
            status_bar_bg_color: Color::Rgb(44, 44, 57),
            chip_jp_color: Color::Rgb(255, 184, 108),
            chip_kr_color: Color::Rgb(255, 121, 198),
            bar_color: Color::Rgb(189, 147, 249),
            link_color: Color::Rgb(97, 175, 239),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::krusty()
    }
}
