//! Configuration errors.

use std::fmt;
use std::io;

/// Error raised while reading or writing the config file.
#[derive(Debug)]
pub enum ConfigError {
    /// The platform has no config directory for this user.
    NoConfigDir,
    /// Reading or writing the file failed.
    Io(io::Error),
    /// The file is not valid TOML for [`crate::Config`].
    Parse(toml::de::Error),
    /// The config could not be turned into TOML.
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "Configuration error: no config directory"),
            ConfigError::Io(e) => write!(f, "Configuration error: {e}"),
            ConfigError::Parse(e) => write!(f, "Configuration error: invalid TOML: {e}"),
            ConfigError::Serialize(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NoConfigDir => None,
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}
