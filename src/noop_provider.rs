use crate::level::LogLevel;
use crate::provider::LogProvider;
use crate::record::LogRecord;
use std::error::Error;

/// A provider that simply drops all records.
///
/// Useful for measuring the overhead of the pipeline itself without any
/// backend work, and for unit tests that don't care about output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProvider;

impl LogProvider for NoopProvider {
    fn log_entry(&self, _record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn is_level_enabled(&self, _level: LogLevel) -> bool {
        true
    }
}
