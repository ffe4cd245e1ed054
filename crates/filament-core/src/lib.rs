//! Core types shared across the filament crates.

mod color;
mod theme;

pub use color::{ACCENT, blend, rgb_components};
pub use theme::Theme;
