//! Light and dark color themes.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Color theme for the whole screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Switch to the other theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Get the display name of the theme.
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Screen background; translucent shapes are blended against it.
    pub fn backdrop(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(10, 10, 10),
            Theme::Light => Color::Rgb(248, 249, 250),
        }
    }

    /// Primary text color.
    pub fn text(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(255, 255, 255),
            Theme::Light => Color::Rgb(33, 37, 41),
        }
    }

    /// Secondary text color for hints and subtitles.
    pub fn muted(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(136, 136, 136),
            Theme::Light => Color::Rgb(108, 117, 125),
        }
    }

    /// Highlight color for names and key hints.
    pub fn accent(&self) -> Color {
        match self {
            Theme::Dark => crate::ACCENT,
            Theme::Light => Color::Rgb(0, 123, 167),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_roundtrip() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }

    #[test]
    fn test_backdrops_differ() {
        assert_ne!(Theme::Dark.backdrop(), Theme::Light.backdrop());
        assert_eq!(Theme::Light.name(), "light");
    }
}
