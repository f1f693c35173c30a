//! Runtime configuration read from the environment.

use std::{env, fmt};

/// Environment variable that switches verbose parser logging on.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    ExplicitVar,
    Default,
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSource::ExplicitVar => write!(f, "explicit {}", LOG_LEVEL_ENV),
            LogSource::Default => write!(f, "default (disabled)"),
        }
    }
}

/// Whether debug logging is on, and where that decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub enabled: bool,
    pub source: LogSource,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_value(env::var(LOG_LEVEL_ENV).ok().as_deref())
    }

    /// Interpret a raw `LOG_LEVEL` value.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(raw) => LogSettings {
                enabled: matches!(
                    raw.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                ),
                source: LogSource::ExplicitVar,
            },
            None => LogSettings {
                enabled: false,
                source: LogSource::Default,
            },
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self::from_value(None)
    }
}
