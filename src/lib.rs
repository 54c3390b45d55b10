pub mod ambient;
pub mod context;
pub mod env;
pub mod format;
pub mod level;
pub mod logger;
pub mod memory_provider;
pub mod noop_provider;
pub mod properties;
pub mod provider;
pub mod record;
pub mod sequence;
pub mod stderr_provider;

pub use ambient::{set_thread_correlation_id, thread_correlation_id, thread_log_context};
pub use context::{LogContext, ScopeHandle};
pub use format::FormatArg;
pub use level::LogLevel;
pub use logger::{BuildError, LogEntry, Logger, LoggerConfig};
pub use properties::{ExtendedProperty, PropertySet, ToPropertyMap, CORRELATION_ID_PROPERTY};
pub use provider::{LogProvider, TimeSource, UsernameSource};
pub use record::LogRecord;
pub use sequence::SequenceCounter;
