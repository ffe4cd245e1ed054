//! Configuration loading and saving for filament.
//!
//! The config lives in `config.toml` under the platform config directory.
//! Every field has a default, so a partial (or missing) file is fine. The
//! theme is written back whenever the user toggles it, which is how the
//! choice survives restarts.

mod error;

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use filament_core::Theme;
use filament_field::{Boundary, CellSize, FieldSettings};
use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color theme, persisted across runs.
    pub theme: Theme,
    /// Animation frames per second.
    pub fps: u32,
    /// Virtual pixel width of one terminal cell.
    pub cell_width_px: u16,
    /// Virtual pixel height of one terminal cell.
    pub cell_height_px: u16,
    /// Particle field tunables.
    pub field: FieldConfig,
    /// Hero banner text.
    pub hero: HeroConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            fps: 60,
            cell_width_px: 8,
            cell_height_px: 16,
            field: FieldConfig::default(),
            hero: HeroConfig::default(),
        }
    }
}

/// Edge handling as written in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    #[default]
    Overshoot,
    Reflect,
}

impl From<BoundaryMode> for Boundary {
    fn from(mode: BoundaryMode) -> Self {
        match mode {
            BoundaryMode::Reflect => Boundary::Reflect,
            BoundaryMode::Overshoot => Boundary::Overshoot,
        }
    }
}

/// Particle field section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub link_distance: f64,
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub boundary: BoundaryMode,
}

impl Default for FieldConfig {
    fn default() -> Self {
        let defaults = FieldSettings::default();
        Self {
            particle_count: defaults.particle_count,
            link_distance: defaults.link_distance,
            max_speed: defaults.max_speed,
            min_radius: defaults.min_radius,
            max_radius: defaults.max_radius,
            boundary: BoundaryMode::Overshoot,
        }
    }
}

impl FieldConfig {
    /// Convert to field settings, replacing unusable values with defaults.
    pub fn settings(&self) -> FieldSettings {
        let defaults = FieldSettings::default();

        let link_distance = if self.link_distance.is_finite() && self.link_distance > 0.0 {
            self.link_distance
        } else {
            log::warn!(
                "invalid link_distance {}; using {}",
                self.link_distance,
                defaults.link_distance
            );
            defaults.link_distance
        };

        let max_speed = if self.max_speed.is_finite() && self.max_speed >= 0.0 {
            self.max_speed
        } else {
            log::warn!(
                "invalid max_speed {}; using {}",
                self.max_speed,
                defaults.max_speed
            );
            defaults.max_speed
        };

        let radii_ok = self.min_radius.is_finite()
            && self.max_radius.is_finite()
            && self.min_radius > 0.0
            && self.min_radius <= self.max_radius;
        let (min_radius, max_radius) = if radii_ok {
            (self.min_radius, self.max_radius)
        } else {
            log::warn!(
                "invalid particle radius range {}..{}; using {}..{}",
                self.min_radius,
                self.max_radius,
                defaults.min_radius,
                defaults.max_radius
            );
            (defaults.min_radius, defaults.max_radius)
        };

        FieldSettings {
            particle_count: self.particle_count,
            link_distance,
            max_speed,
            min_radius,
            max_radius,
            boundary: self.boundary.into(),
        }
    }
}

/// Hero banner section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub name: String,
    pub title: String,
    pub phrases: Vec<String>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            name: "Alex Developer".to_string(),
            title: "Full Stack Developer".to_string(),
            phrases: filament_hero::DEFAULT_PHRASES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Path of the config file in the platform config directory.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "filament")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{e}; using default configuration");
                return Self::default();
            }
        };

        if !path.exists() {
            return Self::default();
        }

        Self::load_from(&path).unwrap_or_else(|e| {
            log::warn!("{e}; using default configuration");
            Self::default()
        })
    }

    /// Load from a specific file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path()?)
    }

    /// Save to a specific file, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Flip the theme and persist it to `path`.
    pub fn toggle_theme_at<P: AsRef<Path>>(&mut self, path: P) -> Result<Theme, ConfigError> {
        self.theme = self.theme.toggle();
        self.save_to(path)?;
        Ok(self.theme)
    }

    /// Per-frame interval in milliseconds.
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / self.fps.clamp(1, 240) as u64
    }

    /// Cell size for the particle backdrop.
    pub fn cell_size(&self) -> CellSize {
        CellSize {
            width: self.cell_width_px.max(1),
            height: self.cell_height_px.max(1),
        }
    }
}
