//! Capturing provider used by tests and for programmatic inspection of
//! what would have been logged.

use crate::level::LogLevel;
use crate::provider::LogProvider;
use crate::record::LogRecord;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Stores every dispatched record in memory.
///
/// Thread-safe and cheaply cloneable; clones share the same buffer, so a
/// test can keep one handle while the logger owns another. An optional
/// minimum level lets tests exercise the pipeline's enablement check.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    records: Arc<Mutex<Vec<LogRecord>>>,
    min_level: Option<LogLevel>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        MemoryProvider::default()
    }

    /// Capture only records at `level` or above; anything below reports
    /// as disabled.
    pub fn with_min_level(level: LogLevel) -> Self {
        MemoryProvider { records: Arc::default(), min_level: Some(level) }
    }

    /// Snapshot of everything captured so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LogProvider for MemoryProvider {
    fn log_entry(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.lock().push(record.clone());
        Ok(())
    }

    fn is_level_enabled(&self, level: LogLevel) -> bool {
        match self.min_level {
            Some(min) => level >= min,
            None => true,
        }
    }
}
