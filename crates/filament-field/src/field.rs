//! The particle field: a fixed-size particle set on a sized surface.

use rand::{SeedableRng, rngs::StdRng};

use crate::paint::{FieldStyle, Painter, Stroke};
use crate::particle::Particle;

/// Dimensions of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    /// Create a surface; `None` when either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    /// Check whether a point lies in `[0, width) × [0, height)`.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..self.width as f64).contains(&x) && (0.0..self.height as f64).contains(&y)
    }
}

/// How particles behave when a step carries them past an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Boundary {
    /// Flip the velocity only; the particle may sit outside for one frame.
    #[default]
    Overshoot,
    /// Flip the velocity and fold the overshoot back inside.
    Reflect,
}

/// Tunables for particle generation and linking.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSettings {
    /// Number of particles kept on the surface.
    pub particle_count: usize,
    /// Pairs closer than this are joined by a line.
    pub link_distance: f64,
    /// Velocity components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    /// Smallest particle radius (inclusive).
    pub min_radius: f64,
    /// Largest particle radius (exclusive).
    pub max_radius: f64,
    /// Edge handling.
    pub boundary: Boundary,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            particle_count: 50,
            link_distance: 100.0,
            max_speed: 0.25,
            min_radius: 1.0,
            max_radius: 3.0,
            boundary: Boundary::Overshoot,
        }
    }
}

/// A connecting line between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Index of the first particle (always lower than `to`).
    pub from: usize,
    /// Index of the second particle.
    pub to: usize,
    /// Distance between the two particles.
    pub distance: f64,
    /// Stroke opacity, `1 - distance / link_distance`.
    pub opacity: f64,
}

/// The animated particle set and the surface it lives on.
#[derive(Debug, Clone)]
pub struct ParticleField {
    settings: FieldSettings,
    surface: Surface,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleField {
    /// Create a field seeded from system entropy.
    pub fn new(settings: FieldSettings, surface: Surface) -> Self {
        Self::with_rng(settings, surface, StdRng::from_entropy())
    }

    /// Create a field with a fixed seed for reproducible animations.
    pub fn with_seed(settings: FieldSettings, surface: Surface, seed: u64) -> Self {
        Self::with_rng(settings, surface, StdRng::seed_from_u64(seed))
    }

    /// Create a field drawing its randomness from `rng`.
    pub fn with_rng(settings: FieldSettings, surface: Surface, rng: StdRng) -> Self {
        let mut field = Self {
            settings,
            surface,
            particles: Vec::new(),
            rng,
        };
        field.reset();
        log::debug!(
            "particle field created: {} particles on {}x{}",
            field.particles.len(),
            surface.width,
            surface.height
        );
        field
    }

    /// Build a field around an explicit particle set.
    #[cfg(test)]
    pub(crate) fn from_particles(surface: Surface, particles: Vec<Particle>) -> Self {
        Self {
            settings: FieldSettings {
                particle_count: particles.len(),
                ..FieldSettings::default()
            },
            surface,
            particles,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Discard every particle and spawn a fresh set on the current surface.
    pub fn reset(&mut self) {
        let surface = self.surface;
        let settings = &self.settings;
        let rng = &mut self.rng;
        self.particles = (0..settings.particle_count)
            .map(|_| Particle::random(&mut *rng, surface, settings))
            .collect();
    }

    /// Adopt a new surface size and regenerate all particles on it.
    pub fn resize(&mut self, surface: Surface) {
        log::debug!(
            "particle field resized: {}x{} -> {}x{}",
            self.surface.width,
            self.surface.height,
            surface.width,
            surface.height
        );
        self.surface = surface;
        self.reset();
    }

    /// Advance every particle by one frame.
    pub fn update(&mut self) {
        let surface = self.surface;
        let boundary = self.settings.boundary;
        for particle in &mut self.particles {
            particle.advance(surface, boundary);
        }
    }

    /// Iterate over every linked pair `i < j` closer than the link distance.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        let threshold = self.settings.link_distance;
        self.particles
            .iter()
            .enumerate()
            .flat_map(move |(i, a)| {
                self.particles[i + 1..]
                    .iter()
                    .enumerate()
                    .filter_map(move |(k, b)| {
                        let distance = a.distance_to(b);
                        (distance < threshold).then(|| Link {
                            from: i,
                            to: i + 1 + k,
                            distance,
                            opacity: 1.0 - distance / threshold,
                        })
                    })
            })
    }

    /// Draw the current frame: clear, particles, then links.
    pub fn render<P: Painter + ?Sized>(&self, painter: &mut P, style: &FieldStyle) {
        painter.clear(self.surface);

        for p in &self.particles {
            painter.fill_circle(p.x, p.y, p.size, style.particle_color);
        }

        for link in self.links() {
            let a = &self.particles[link.from];
            let b = &self.particles[link.to];
            painter.stroke_line(
                (a.x, a.y),
                (b.x, b.y),
                Stroke {
                    color: style.link_color,
                    opacity: link.opacity,
                    width: style.line_width,
                },
            );
        }
    }

    /// Current particles in generation order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current surface dimensions.
    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Settings the field was built with.
    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{DrawCommand, Recorder};

    fn surface(width: u32, height: u32) -> Surface {
        Surface::new(width, height).unwrap()
    }

    fn field(width: u32, height: u32) -> ParticleField {
        ParticleField::with_seed(FieldSettings::default(), surface(width, height), 42)
    }

    #[test]
    fn test_surface_rejects_zero() {
        assert!(Surface::new(0, 10).is_none());
        assert!(Surface::new(10, 0).is_none());
        assert!(Surface::new(1, 1).is_some());
    }

    #[test]
    fn test_init_creates_exact_count() {
        let field = field(100, 100);
        assert_eq!(field.particles().len(), 50);
        assert!(field.particles().iter().all(|p| field.surface().contains(p.x, p.y)));
    }

    #[test]
    fn test_resize_regenerates_within_new_bounds() {
        let mut field = field(100, 100);
        let before = field.particles().to_vec();

        field.resize(surface(200, 50));

        assert_eq!(field.particles().len(), 50);
        assert_eq!(field.surface(), surface(200, 50));
        for p in field.particles() {
            assert!((0.0..200.0).contains(&p.x));
            assert!((0.0..50.0).contains(&p.y));
        }
        assert_ne!(before, field.particles());
    }

    #[test]
    fn test_reset_keeps_count_and_replaces_particles() {
        let mut field = field(100, 100);
        let before = field.particles().to_vec();
        field.reset();
        assert_eq!(field.particles().len(), 50);
        assert_ne!(before, field.particles());
    }

    #[test]
    fn test_same_seed_same_particles() {
        assert_eq!(field(80, 60).particles(), field(80, 60).particles());
    }

    fn reflecting_field(width: u32, height: u32) -> ParticleField {
        let settings = FieldSettings {
            boundary: Boundary::Reflect,
            ..FieldSettings::default()
        };
        ParticleField::with_seed(settings, surface(width, height), 42)
    }

    #[test]
    fn test_default_boundary_is_overshoot() {
        assert_eq!(FieldSettings::default().boundary, Boundary::Overshoot);
        assert_eq!(field(10, 10).settings().boundary, Boundary::Overshoot);
    }

    #[test]
    fn test_default_boundary_spends_at_most_one_frame_outside() {
        let mut field = field(10, 10);
        // Consecutive out-of-range frames per particle, per axis
        let mut outside = vec![(0usize, 0usize); field.particles().len()];
        let mut saw_outside = false;

        for _ in 0..5_000 {
            field.update();
            for ((out_x, out_y), p) in outside.iter_mut().zip(field.particles()) {
                *out_x = if (0.0..10.0).contains(&p.x) { 0 } else { *out_x + 1 };
                *out_y = if (0.0..10.0).contains(&p.y) { 0 } else { *out_y + 1 };
                saw_outside |= *out_x > 0 || *out_y > 0;
                assert!(*out_x <= 1, "x stayed outside: {}", p.x);
                assert!(*out_y <= 1, "y stayed outside: {}", p.y);
            }
        }
        // Small surface and many frames: edges are certainly crossed
        assert!(saw_outside);
    }

    #[test]
    fn test_positions_stay_in_bounds_over_many_frames() {
        let mut field = reflecting_field(100, 100);
        for _ in 0..5_000 {
            field.update();
            for p in field.particles() {
                assert!(p.x >= 0.0 && p.x < 100.0, "x out of bounds: {}", p.x);
                assert!(p.y >= 0.0 && p.y < 100.0, "y out of bounds: {}", p.y);
            }
        }
    }

    #[test]
    fn test_positions_stay_in_bounds_on_tiny_surface() {
        let mut field = reflecting_field(1, 1);
        for _ in 0..1_000 {
            field.update();
            assert!(field.particles().iter().all(|p| field.surface().contains(p.x, p.y)));
        }
    }

    #[test]
    fn test_speed_magnitude_preserved() {
        let mut field = field(20, 20);
        let speeds: Vec<(f64, f64)> = field
            .particles()
            .iter()
            .map(|p| (p.vx.abs(), p.vy.abs()))
            .collect();

        for _ in 0..2_000 {
            field.update();
        }

        for (p, (sx, sy)) in field.particles().iter().zip(speeds) {
            assert_eq!(p.vx.abs(), sx);
            assert_eq!(p.vy.abs(), sy);
        }
    }

    #[test]
    fn test_overshoot_boundary_flips_velocity_only() {
        let settings = FieldSettings {
            boundary: Boundary::Overshoot,
            ..FieldSettings::default()
        };
        let mut field = ParticleField::with_seed(settings, surface(10, 10), 3);
        for _ in 0..1_000 {
            field.update();
            for p in field.particles() {
                // Never further out than a single step
                assert!(p.x > -0.25 && p.x < 10.25);
                assert!(p.y > -0.25 && p.y < 10.25);
            }
        }
    }

    #[test]
    fn test_link_within_threshold() {
        let field = ParticleField::from_particles(
            surface(200, 200),
            vec![
                Particle::new(0.0, 0.0, 0.0, 0.0, 1.0),
                Particle::new(50.0, 0.0, 0.0, 0.0, 1.0),
            ],
        );
        let links: Vec<Link> = field.links().collect();
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].from, links[0].to), (0, 1));
        assert_eq!(links[0].distance, 50.0);
        assert_eq!(links[0].opacity, 0.5);
    }

    #[test]
    fn test_no_link_beyond_threshold() {
        let field = ParticleField::from_particles(
            surface(200, 200),
            vec![
                Particle::new(0.0, 0.0, 0.0, 0.0, 1.0),
                Particle::new(150.0, 0.0, 0.0, 0.0, 1.0),
                // Exactly at the threshold is not linked either
                Particle::new(0.0, 100.0, 0.0, 0.0, 1.0),
            ],
        );
        assert_eq!(field.links().count(), 0);
    }

    #[test]
    fn test_links_cover_each_pair_once() {
        let field = ParticleField::from_particles(
            surface(100, 100),
            vec![
                Particle::new(10.0, 10.0, 0.0, 0.0, 1.0),
                Particle::new(20.0, 10.0, 0.0, 0.0, 1.0),
                Particle::new(30.0, 10.0, 0.0, 0.0, 1.0),
            ],
        );
        let pairs: Vec<(usize, usize)> = field.links().map(|l| (l.from, l.to)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_render_order() {
        let field = ParticleField::from_particles(
            surface(200, 200),
            vec![
                Particle::new(0.0, 0.0, 0.0, 0.0, 1.5),
                Particle::new(50.0, 0.0, 0.0, 0.0, 2.5),
            ],
        );
        let mut recorder = Recorder::default();
        field.render(&mut recorder, &FieldStyle::default());

        let commands = recorder.commands();
        assert_eq!(commands.len(), 4);
        assert!(matches!(commands[0], DrawCommand::Clear(s) if s == surface(200, 200)));
        assert!(matches!(commands[1], DrawCommand::Circle { radius, .. } if radius == 1.5));
        assert!(matches!(commands[2], DrawCommand::Circle { x, .. } if x == 50.0));
        match commands[3] {
            DrawCommand::Line { from, to, stroke } => {
                assert_eq!(from, (0.0, 0.0));
                assert_eq!(to, (50.0, 0.0));
                assert_eq!(stroke.opacity, 0.5);
                assert_eq!(stroke.width, 0.5);
            }
            ref other => panic!("expected a line, got {other:?}"),
        }
    }
}
