//! Ratatui widget that paints a particle field onto a braille canvas.

use filament_core::blend;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Line as CanvasLine, Points},
    },
};

use crate::field::ParticleField;
use crate::paint::{DrawCommand, FieldStyle, Recorder};

/// Draws one frame of a field, translucent over `backdrop`.
#[derive(Debug, Clone, Copy)]
pub struct FieldCanvas<'a> {
    field: Option<&'a ParticleField>,
    style: FieldStyle,
    backdrop: Color,
}

impl<'a> FieldCanvas<'a> {
    pub fn new(field: Option<&'a ParticleField>, style: FieldStyle, backdrop: Color) -> Self {
        Self {
            field,
            style,
            backdrop,
        }
    }
}

impl Widget for FieldCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(field) = self.field else {
            return;
        };
        if area.is_empty() {
            return;
        }

        let mut recorder = Recorder::default();
        field.render(&mut recorder, &self.style);

        let surface = field.surface();
        let width = surface.width as f64;
        let height = surface.height as f64;
        let backdrop = self.backdrop;
        let opacity = self.style.opacity;
        // Pixel size of one braille dot
        let dot = (
            width / (area.width as f64 * 2.0),
            height / (area.height as f64 * 4.0),
        );

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(backdrop)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for command in recorder.commands() {
                    // Canvas y grows upwards, field y grows downwards
                    match *command {
                        DrawCommand::Clear(_) => {}
                        DrawCommand::Circle {
                            x,
                            y,
                            radius,
                            color,
                        } => ctx.draw(&Points {
                            coords: &disc_points(x, height - y, radius, dot),
                            color: blend(backdrop, color, opacity),
                        }),
                        // Terminal cells have no sub-cell stroke width
                        DrawCommand::Line { from, to, stroke } => ctx.draw(&CanvasLine::new(
                            from.0,
                            height - from.1,
                            to.0,
                            height - to.1,
                            blend(backdrop, stroke.color, opacity * stroke.opacity as f32),
                        )),
                    }
                }
            })
            .render(area, buf);
    }
}

/// Sample points covering a filled disc, one per braille dot.
fn disc_points(cx: f64, cy: f64, radius: f64, dot: (f64, f64)) -> Vec<(f64, f64)> {
    let mut points = vec![(cx, cy)];
    let (step_x, step_y) = (dot.0.max(f64::EPSILON), dot.1.max(f64::EPSILON));
    let reach_x = (radius / step_x).floor() as i64;
    let reach_y = (radius / step_y).floor() as i64;

    for j in -reach_y..=reach_y {
        for i in -reach_x..=reach_x {
            let (dx, dy) = (i as f64 * step_x, j as f64 * step_y);
            if (i, j) != (0, 0) && dx * dx + dy * dy <= radius * radius {
                points.push((cx + dx, cy + dy));
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldSettings, Surface};
    use crate::particle::Particle;

    fn painted_cells(buf: &Buffer) -> usize {
        buf.content.iter().filter(|cell| cell.symbol() != " ").count()
    }

    #[test]
    fn test_no_field_draws_nothing() {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        FieldCanvas::new(None, FieldStyle::default(), Color::Rgb(10, 10, 10)).render(area, &mut buf);
        assert_eq!(painted_cells(&buf), 0);
    }

    #[test]
    fn test_empty_area_draws_nothing() {
        let field = ParticleField::with_seed(
            FieldSettings::default(),
            Surface::new(160, 160).unwrap(),
            9,
        );
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 4));
        FieldCanvas::new(Some(&field), FieldStyle::default(), Color::Black).render(area, &mut buf);
        assert_eq!(painted_cells(&buf), 0);
    }

    #[test]
    fn test_field_is_painted() {
        let field = ParticleField::with_seed(
            FieldSettings::default(),
            Surface::new(160, 160).unwrap(),
            9,
        );
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        FieldCanvas::new(Some(&field), FieldStyle::default(), Color::Rgb(10, 10, 10))
            .render(area, &mut buf);
        assert!(painted_cells(&buf) > 0);
    }

    #[test]
    fn test_disc_points_fill_the_interior() {
        // Tiny radius: just the center
        assert_eq!(disc_points(5.0, 5.0, 1.0, (4.0, 4.0)), vec![(5.0, 5.0)]);

        let points = disc_points(0.0, 0.0, 10.0, (4.0, 4.0));
        assert!(points.contains(&(4.0, 0.0)));
        assert!(points.contains(&(0.0, -8.0)));
        assert!(points.contains(&(4.0, 8.0)));
        assert!(!points.contains(&(8.0, 8.0)));
        assert!(points.iter().all(|(x, y)| x * x + y * y <= 100.0));
    }

    #[test]
    fn test_large_particle_is_filled() {
        let field = ParticleField::from_particles(
            Surface::new(200, 200).unwrap(),
            vec![Particle::new(100.0, 100.0, 0.0, 0.0, 40.0)],
        );
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        FieldCanvas::new(Some(&field), FieldStyle::default(), Color::Black).render(area, &mut buf);

        // An outline would leave the cells around the center blank
        for (x, y) in [(18, 8), (21, 8), (18, 11), (21, 11)] {
            assert_ne!(buf[(x, y)].symbol(), " ", "cell ({x}, {y}) is empty");
        }
    }

    #[test]
    fn test_link_color_is_faded() {
        let field = ParticleField::from_particles(
            Surface::new(200, 200).unwrap(),
            vec![
                Particle::new(20.0, 100.0, 0.0, 0.0, 1.0),
                Particle::new(120.0 - 1e-6, 100.0, 0.0, 0.0, 1.0),
            ],
        );
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        let backdrop = Color::Rgb(0, 0, 0);
        FieldCanvas::new(Some(&field), FieldStyle::default(), backdrop).render(area, &mut buf);

        // A nearly-expired link fades all the way into the backdrop
        let faded = blend(backdrop, filament_core::ACCENT, 0.0);
        assert!(
            buf.content
                .iter()
                .any(|cell| cell.symbol() != " " && cell.fg == faded)
        );
    }
}
