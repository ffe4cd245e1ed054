//! Full-screen particle background state.

use filament_core::Theme;
use ratatui::{Frame, buffer::Buffer, layout::Rect, widgets::Widget};

use crate::canvas::FieldCanvas;
use crate::field::{FieldSettings, ParticleField, Surface};
use crate::paint::FieldStyle;

/// Virtual pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 8,
            height: 16,
        }
    }
}

/// Particle background that follows the terminal size.
#[derive(Debug)]
pub struct ParticleBackdrop {
    /// The field, once a non-empty area has been seen.
    field: Option<ParticleField>,
    /// Settings used whenever a field is created.
    settings: FieldSettings,
    /// Colors and opacity of the overlay.
    style: FieldStyle,
    /// Pixel size of a terminal cell.
    cell: CellSize,
    /// Last known area width in cells.
    last_width: u16,
    /// Last known area height in cells.
    last_height: u16,
    /// Whether frames are frozen.
    paused: bool,
    /// Fixed seed for the field, if any.
    seed: Option<u64>,
}

impl Default for ParticleBackdrop {
    fn default() -> Self {
        Self::new(FieldSettings::default(), FieldStyle::default(), CellSize::default())
    }
}

impl ParticleBackdrop {
    /// Create a backdrop; the field itself is created on the first render.
    pub fn new(settings: FieldSettings, style: FieldStyle, cell: CellSize) -> Self {
        Self {
            field: None,
            settings,
            style,
            cell,
            last_width: 0,
            last_height: 0,
            paused: false,
            seed: None,
        }
    }

    /// Use a fixed seed so the animation is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Pixel surface covering `width × height` cells, if non-empty.
    pub fn surface_for(&self, width: u16, height: u16) -> Option<Surface> {
        Surface::new(
            width as u32 * self.cell.width as u32,
            height as u32 * self.cell.height as u32,
        )
    }

    /// React to a terminal size change.
    ///
    /// An empty area leaves the current field untouched; it is simply not
    /// drawn until the area becomes usable again.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.last_width && height == self.last_height && self.field.is_some() {
            return;
        }

        let Some(surface) = self.surface_for(width, height) else {
            log::debug!("backdrop area {width}x{height} is empty; skipping field setup");
            return;
        };

        self.last_width = width;
        self.last_height = height;

        match &mut self.field {
            Some(field) => field.resize(surface),
            None => {
                let settings = self.settings.clone();
                self.field = Some(match self.seed {
                    Some(seed) => ParticleField::with_seed(settings, surface, seed),
                    None => ParticleField::new(settings, surface),
                });
            }
        }
    }

    /// Advance the field by one frame unless paused.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        if let Some(field) = &mut self.field {
            field.update();
        }
    }

    /// Freeze or resume the animation; returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Whether the animation is frozen.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Replace every particle with a fresh random one.
    pub fn regenerate(&mut self) {
        if let Some(field) = &mut self.field {
            field.reset();
        }
    }

    /// The current field, if one has been created.
    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    /// Draw the current frame over the whole frame area.
    ///
    /// Drawing never advances the animation; call [`Self::tick`] once per
    /// frame interval for that.
    pub fn render(&mut self, frame: &mut Frame, theme: Theme) {
        let area = frame.area();
        self.render_area(area, frame.buffer_mut(), theme);
    }

    /// Draw the current frame into `area` of `buf`, following its size.
    pub fn render_area(&mut self, area: Rect, buf: &mut Buffer, theme: Theme) {
        if area.is_empty() {
            return;
        }

        self.resize(area.width, area.height);

        FieldCanvas::new(self.field.as_ref(), self.style, theme.backdrop()).render(area, buf);
    }
}
