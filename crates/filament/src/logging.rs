//! File logging setup.
//!
//! The terminal is owned by the UI, so log records go to
//! `<cache dir>/filament.log` instead of stderr.

use std::fs::{self, File};

use directories::ProjectDirs;
use env_logger::{Env, Target};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "FILAMENT_LOG";

/// Log file name inside the cache directory.
const LOG_FILE: &str = "filament.log";

/// Initialize logging; without a writable cache directory logging stays off.
pub fn init() {
    let Some(dirs) = ProjectDirs::from("", "", "filament") else {
        return;
    };
    let dir = dirs.cache_dir();
    if fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join(LOG_FILE)) else {
        return;
    };

    let _ = env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "warn"))
        .target(Target::Pipe(Box::new(file)))
        .try_init();
}
