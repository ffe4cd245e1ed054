//! Color helpers for drawing translucent shapes on a terminal.

use ratatui::style::Color;

/// Accent cyan (`#00d4ff`) used for particles and their links.
pub const ACCENT: Color = Color::Rgb(0, 212, 255);

/// Split a color into RGB components.
///
/// Only `Color::Rgb` carries exact components; named colors map to their
/// usual xterm values and anything else falls back to black.
pub fn rgb_components(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::White => (255, 255, 255),
        Color::Gray => (192, 192, 192),
        Color::DarkGray => (128, 128, 128),
        Color::Red => (205, 0, 0),
        Color::Green => (0, 205, 0),
        Color::Blue => (0, 0, 238),
        Color::Cyan => (0, 205, 205),
        Color::Yellow => (205, 205, 0),
        Color::Magenta => (205, 0, 205),
        _ => (0, 0, 0),
    }
}

/// Composite `fg` over `backdrop` with the given alpha (0.0-1.0).
pub fn blend(backdrop: Color, fg: Color, alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    let (br, bg, bb) = rgb_components(backdrop);
    let (fr, fg_, fb) = rgb_components(fg);

    let mix = |b: u8, f: u8| (b as f32 + (f as f32 - b as f32) * alpha).round() as u8;

    Color::Rgb(mix(br, fr), mix(bg, fg_), mix(bb, fb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_extremes() {
        let backdrop = Color::Rgb(10, 10, 10);
        assert_eq!(blend(backdrop, ACCENT, 0.0), backdrop);
        assert_eq!(blend(backdrop, ACCENT, 1.0), ACCENT);
        // Out of range alpha is clamped
        assert_eq!(blend(backdrop, ACCENT, 3.0), ACCENT);
    }

    #[test]
    fn test_blend_midpoint() {
        let mid = blend(Color::Rgb(0, 0, 0), Color::Rgb(200, 100, 50), 0.5);
        assert_eq!(mid, Color::Rgb(100, 50, 25));
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(rgb_components(Color::White), (255, 255, 255));
        assert_eq!(rgb_components(Color::Reset), (0, 0, 0));
    }
}
