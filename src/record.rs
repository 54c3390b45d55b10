use crate::level::LogLevel;
use crate::properties::PropertySet;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Immutable record describing one log call.
///
/// Built once per successful call by the pipeline, handed to the
/// provider, and never mutated afterwards. `event_id` is the value the
/// logging call returns to its caller; a nil id means the record was
/// never dispatched.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub event_id: Uuid,
    pub sequence_number: u32,
    pub correlation_id: Option<Uuid>,
    pub level: LogLevel,
    pub message: Option<String>,
    pub username: String,
    pub machine_name: String,
    pub process_id: u32,
    pub process_name: String,
    pub error: Option<String>,
    pub method_name: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub properties: PropertySet,
}
