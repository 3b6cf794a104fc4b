//! Color palettes for the light and dark themes

use crate::state::Theme;
use ratatui::style::Color;

/// Colors used by every widget, resolved from the active theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
    pub success: Color,
    pub highlight_bg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                error: Color::Red,
                success: Color::Green,
                highlight_bg: Color::LightBlue,
            },
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                error: Color::LightRed,
                success: Color::LightGreen,
                highlight_bg: Color::Blue,
            },
        }
    }
}
