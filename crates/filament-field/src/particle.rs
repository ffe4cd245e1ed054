//! A single drifting particle.

use rand::Rng;

use crate::field::{Boundary, FieldSettings, Surface};

/// A moving point on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Horizontal position in surface pixels.
    pub x: f64,
    /// Vertical position in surface pixels (0 at the top).
    pub y: f64,
    /// Horizontal velocity in pixels per frame.
    pub vx: f64,
    /// Vertical velocity in pixels per frame.
    pub vy: f64,
    /// Radius in pixels.
    pub size: f64,
}

impl Particle {
    /// Create a particle at the given position.
    pub fn new(x: f64, y: f64, vx: f64, vy: f64, size: f64) -> Self {
        Self { x, y, vx, vy, size }
    }

    /// Spawn a particle with uniformly random state on the surface.
    pub(crate) fn random<R: Rng>(
        rng: &mut R,
        surface: Surface,
        settings: &FieldSettings,
    ) -> Self {
        let speed = settings.max_speed;
        let mut velocity = || {
            if speed > 0.0 {
                rng.gen_range(-speed..speed)
            } else {
                0.0
            }
        };
        let vx = velocity();
        let vy = velocity();

        let size = if settings.min_radius < settings.max_radius {
            rng.gen_range(settings.min_radius..settings.max_radius)
        } else {
            settings.min_radius
        };

        Self {
            x: rng.gen_range(0.0..surface.width as f64),
            y: rng.gen_range(0.0..surface.height as f64),
            vx,
            vy,
            size,
        }
    }

    /// Euclidean distance to another particle.
    pub fn distance_to(&self, other: &Particle) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Move by one frame of velocity, then reflect off the surface edges.
    pub(crate) fn advance(&mut self, surface: Surface, boundary: Boundary) {
        let (prev_x, prev_y) = (self.x, self.y);
        self.x += self.vx;
        self.y += self.vy;

        reflect_axis(&mut self.x, &mut self.vx, prev_x, surface.width as f64, boundary);
        reflect_axis(&mut self.y, &mut self.vy, prev_y, surface.height as f64, boundary);
    }
}

/// Flip the velocity when the coordinate left `[0, limit)`.
fn reflect_axis(pos: &mut f64, vel: &mut f64, prev: f64, limit: f64, boundary: Boundary) {
    if *pos >= 0.0 && *pos < limit {
        return;
    }

    *vel = -*vel;

    if boundary == Boundary::Reflect {
        let mirrored = if *pos < 0.0 { -*pos } else { 2.0 * limit - *pos };
        // Landing exactly on the far edge (or a surface thinner than one
        // step) falls back to where the particle came from.
        *pos = if (0.0..limit).contains(&mirrored) {
            mirrored
        } else {
            prev
        };
    }
}
