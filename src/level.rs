use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a log entry.
///
/// Ordering follows the usual convention: `Trace` is the most verbose,
/// `Error` the most severe. Providers use this ordering to implement
/// [`is_level_enabled`](crate::provider::LogProvider::is_level_enabled)
/// thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(name)
    }
}
