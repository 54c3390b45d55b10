use crate::level::LogLevel;
use crate::provider::LogProvider;
use crate::record::LogRecord;
use std::error::Error;
use std::io::Write;

/// Writes each record to stderr as one JSON object per line.
///
/// Handy as a development backend and as a reference for how little a
/// provider has to do: serialize, write, report failures through the
/// `Result` and let the pipeline isolate them.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrProvider {
    min_level: Option<LogLevel>,
}

impl StderrProvider {
    pub fn new() -> Self {
        StderrProvider::default()
    }

    pub fn with_min_level(level: LogLevel) -> Self {
        StderrProvider { min_level: Some(level) }
    }
}

impl LogProvider for StderrProvider {
    fn log_entry(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        let line = serde_json::to_string(record)?;
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        writeln!(handle, "{line}")?;
        Ok(())
    }

    fn is_level_enabled(&self, level: LogLevel) -> bool {
        match self.min_level {
            Some(min) => level >= min,
            None => true,
        }
    }
}
