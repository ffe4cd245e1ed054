//! Particle-connection field animation.
//!
//! A [`ParticleField`] owns a fixed number of drifting particles on a
//! [`Surface`]. Each frame the field is advanced with
//! [`ParticleField::update`] and drawn through any [`Painter`]: particles as
//! filled circles, and every pair closer than the link distance joined by a
//! line that fades out as the pair separates.
//!
//! [`ParticleBackdrop`] wraps a field as a full-screen ratatui background
//! that follows the terminal size.

mod backdrop;
mod canvas;
mod field;
mod paint;
mod particle;

pub use backdrop::{CellSize, ParticleBackdrop};
pub use canvas::FieldCanvas;
pub use field::{Boundary, FieldSettings, Link, ParticleField, Surface};
pub use paint::{DrawCommand, FieldStyle, Painter, Recorder, Stroke};
pub use particle::Particle;
