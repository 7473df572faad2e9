//! Color palettes for the light/dark theme preference.

use ratatui::style::Color;

use crate::config::Theme;

/// Resolved color palette for the TUIs.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Accent color (active panes, cursor).
    pub accent: Color,
    /// Highlight color (selected entries).
    pub highlight: Color,
    /// Favorite marker color.
    pub favorite: Color,
    /// Dimmed text color.
    pub dim: Color,
}

impl Palette {
    /// Returns the palette for a theme preference.
    #[must_use]
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                accent: Color::Cyan,
                highlight: Color::Yellow,
                favorite: Color::Red,
                dim: Color::DarkGray,
            },
            Theme::Light => Self {
                accent: Color::Blue,
                highlight: Color::Magenta,
                favorite: Color::Red,
                dim: Color::Gray,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ_by_theme() {
        // Arrange & Act
        let dark = Palette::for_theme(Theme::Dark);
        let light = Palette::for_theme(Theme::Light);

        // Assert
        assert_eq!(dark.accent, Color::Cyan);
        assert_eq!(light.accent, Color::Blue);
    }
}
