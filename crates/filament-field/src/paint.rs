//! Drawing surface abstraction.

use filament_core::ACCENT;
use ratatui::style::Color;

use crate::field::Surface;

/// Line styling for a particle link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f64,
    /// Line width in pixels.
    pub width: f64,
}

/// Fixed colors and widths used when drawing a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStyle {
    pub particle_color: Color,
    pub link_color: Color,
    pub line_width: f64,
    /// Opacity of the whole overlay.
    pub opacity: f32,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            particle_color: ACCENT,
            link_color: ACCENT,
            line_width: 0.5,
            opacity: 0.3,
        }
    }
}

/// A 2D target a field can draw itself onto.
pub trait Painter {
    /// Wipe the whole surface.
    fn clear(&mut self, surface: Surface);

    /// Draw a filled circle centered at `(x, y)`.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);

    /// Draw a straight line between two points.
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(Surface),
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: Stroke,
    },
}

/// Painter that stores the drawing operations of the current frame.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    /// Operations recorded since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Painter for Recorder {
    fn clear(&mut self, surface: Surface) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(surface));
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_drops_previous_frame() {
        let surface = Surface::new(10, 10).unwrap();
        let mut recorder = Recorder::default();
        recorder.clear(surface);
        recorder.fill_circle(1.0, 1.0, 1.0, ACCENT);
        assert_eq!(recorder.commands().len(), 2);

        recorder.clear(surface);
        assert_eq!(recorder.commands(), &[DrawCommand::Clear(surface)]);
    }
}
