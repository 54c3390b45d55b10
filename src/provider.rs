use crate::level::LogLevel;
use crate::record::LogRecord;
use chrono::{DateTime, Utc};
use std::error::Error;

/// Backend destination for [`LogRecord`]s produced by the pipeline.
///
/// Implementations map a record onto a concrete logging framework or
/// transport (tracing, syslog, a database, stdout, ...). The pipeline
/// calls `log_entry` synchronously on the caller's thread; providers
/// that need buffering or network I/O are expected to hand off
/// internally and return quickly.
pub trait LogProvider: Send + Sync {
    /// Deliver a single fully-populated record to the backend.
    ///
    /// **Parameters**
    /// - `record`: immutable [`LogRecord`] built by the pipeline.
    ///
    /// **Returns**
    /// - `Ok(())` if the record was accepted by the backend.
    /// - `Err(..)` on any backend failure. The pipeline swallows the
    ///   error, optionally traces it, and reports a nil event id to the
    ///   caller; it never reaches application code.
    fn log_entry(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Whether the backend would accept records at `level`.
    ///
    /// The pipeline consults this before building a record (unless the
    /// check is disabled in configuration) so that disabled levels cost
    /// nothing. Default implementation accepts every level.
    fn is_level_enabled(&self, _level: LogLevel) -> bool {
        true
    }
}

/// Source of the username stamped on each record.
///
/// Called once per log call. Implementations must not fail; any string,
/// including an empty one, is acceptable.
pub trait UsernameSource: Send + Sync {
    fn username(&self) -> String;
}

/// Reads the username from the `USER` / `USERNAME` environment
/// variables, falling back to an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvUsername;

impl UsernameSource for EnvUsername {
    fn username(&self) -> String {
        std::env::var(crate::env::USER_ENV)
            .or_else(|_| std::env::var(crate::env::USERNAME_ENV))
            .unwrap_or_default()
    }
}

/// Clock abstraction so tests can pin timestamps. The pipeline never
/// reads the system clock directly.
pub trait TimeSource: Send + Sync {
    fn utc_now(&self) -> DateTime<Utc>;
}

/// The real clock: `Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
