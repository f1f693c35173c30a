//! Logging setup.
//!
//! The parser and shell emit `tracing` events; this installs a stderr
//! subscriber whose level follows [`LogSettings`].

use crate::config::LogSettings;
use tracing::{debug, level_filters::LevelFilter};

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(settings: LogSettings) {
    let level = if settings.enabled {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    };

    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        debug!(source = %settings.source, "logging enabled");
    }
}
