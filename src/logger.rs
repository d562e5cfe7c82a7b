//! `log` records forwarded to the browser console.

use log::Level;

/// Verbose in debug builds, lifecycle messages only in release.
pub fn default_level() -> Level {
    if cfg!(debug_assertions) { Level::Debug } else { Level::Info }
}

/// Install the console logger. Later calls are no-ops.
pub fn init() {
    // only fails when a logger is already set
    let _ = console_log::init_with_level(default_level());
}
