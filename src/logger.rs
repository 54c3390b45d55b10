//! The per-call logging pipeline: level enablement, ambient/explicit
//! property merging, correlation-id precedence, sequence numbering,
//! record construction and provider dispatch with failure isolation.

use crate::ambient::ContextResolver;
use crate::context::LogContext;
use crate::env;
use crate::format::{format_message, FormatArg};
use crate::level::LogLevel;
use crate::properties::{ExtendedProperty, PropertySet, ToPropertyMap};
use crate::provider::{EnvUsername, LogProvider, SystemClock, TimeSource, UsernameSource};
use crate::record::LogRecord;
use crate::sequence::SequenceCounter;
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

/// Static configuration consumed read-only for the lifetime of a
/// [`Logger`].
///
/// **Fields**
/// - `skip_level_enabled_check`: when `true`, records are built and
///   dispatched without asking the provider whether the level is
///   enabled.
/// - `use_sequence_numbers`: when `true`, each record gets the next
///   value from the process-wide [`SequenceCounter`]; otherwise 0.
/// - `default_properties`: extended properties every record inherits
///   when no more specific ambient properties exist.
/// - `machine_name`, `process_name`, `process_id`: identity fields
///   stamped verbatim on every record.
/// - `internal_diagnostics`: when `true`, a failed provider dispatch is
///   reported through `tracing` before being swallowed.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub skip_level_enabled_check: bool,
    pub use_sequence_numbers: bool,
    pub default_properties: Vec<ExtendedProperty>,
    pub machine_name: String,
    pub process_name: String,
    pub process_id: u32,
    pub internal_diagnostics: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            skip_level_enabled_check: false,
            use_sequence_numbers: true,
            default_properties: Vec::new(),
            machine_name: env::env_or(env::MACHINE_NAME_ENV, ""),
            process_name: env::current_process_name(),
            process_id: std::process::id(),
            internal_diagnostics: false,
        }
    }
}

/// Error type returned when assembling a [`Logger`] from its builder.
///
/// Construction fails fast: a logger missing a required collaborator is
/// never allowed to exist and degrade silently at call time.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("no log provider was supplied")]
    MissingProvider,
}

/// Builder for [`Logger`]. Only the provider is mandatory; username and
/// time sources default to the environment and the system clock.
#[derive(Default)]
pub struct LoggerBuilder {
    provider: Option<Arc<dyn LogProvider>>,
    provider_name: &'static str,
    config: LoggerConfig,
    username: Option<Arc<dyn UsernameSource>>,
    time: Option<Arc<dyn TimeSource>>,
}

impl LoggerBuilder {
    pub fn provider<P: LogProvider + 'static>(mut self, provider: P) -> Self {
        self.provider = Some(Arc::new(provider));
        self.provider_name = std::any::type_name::<P>();
        self
    }

    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn username_source<U: UsernameSource + 'static>(mut self, source: U) -> Self {
        self.username = Some(Arc::new(source));
        self
    }

    pub fn time_source<T: TimeSource + 'static>(mut self, source: T) -> Self {
        self.time = Some(Arc::new(source));
        self
    }

    pub fn build(self) -> Result<Logger, BuildError> {
        let provider = self.provider.ok_or(BuildError::MissingProvider)?;
        let default_context = if self.config.default_properties.is_empty() {
            None
        } else {
            Some(LogContext::with_defaults(self.config.default_properties.clone()))
        };
        Ok(Logger {
            provider,
            provider_name: self.provider_name,
            resolver: ContextResolver::new(default_context),
            username: self.username.unwrap_or_else(|| Arc::new(EnvUsername)),
            time: self.time.unwrap_or_else(|| Arc::new(SystemClock)),
            config: self.config,
        })
    }
}

/// Shape of one logging call.
///
/// Everything except the level is optional; the pipeline tolerates any
/// combination of absent fields. Built with chained setters:
///
/// ```
/// use ambient_log::logger::{LogEntry, Logger};
/// use ambient_log::level::LogLevel;
/// use ambient_log::memory_provider::MemoryProvider;
///
/// let logger = Logger::builder().provider(MemoryProvider::new()).build().unwrap();
/// let event_id = logger.log(
///     LogEntry::new(LogLevel::Info)
///         .message("order {0} accepted")
///         .arg(42)
///         .at("accept_order", file!(), line!()),
/// );
/// assert!(!event_id.is_nil());
/// ```
pub struct LogEntry<'a> {
    level: LogLevel,
    message: Option<&'a str>,
    args: Vec<FormatArg>,
    correlation_id: Option<Uuid>,
    error: Option<&'a (dyn Error + 'static)>,
    properties: Option<&'a dyn ToPropertyMap>,
    method_name: Option<&'a str>,
    file: Option<&'a str>,
    line: Option<u32>,
}

impl<'a> LogEntry<'a> {
    pub fn new(level: LogLevel) -> Self {
        LogEntry {
            level,
            message: None,
            args: Vec::new(),
            correlation_id: None,
            error: None,
            properties: None,
            method_name: None,
            file: None,
            line: None,
        }
    }

    /// Message template with `{0}`-style positional placeholders.
    pub fn message(mut self, message: &'a str) -> Self {
        self.message = Some(message);
        self
    }

    /// Append one positional message argument.
    pub fn arg(mut self, arg: impl Into<FormatArg>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Replace the positional message arguments wholesale.
    pub fn args(mut self, args: Vec<FormatArg>) -> Self {
        self.args = args;
        self
    }

    /// Explicit correlation id; takes precedence over every ambient or
    /// property-carried id.
    pub fn correlation_id(mut self, id: Uuid) -> Self {
        self.correlation_id = Some(id);
        self
    }

    pub fn error(mut self, error: &'a (dyn Error + 'static)) -> Self {
        self.error = Some(error);
        self
    }

    /// Per-call property bag; entries overwrite same-named ambient
    /// properties, and a reserved-key entry becomes a correlation id
    /// override.
    pub fn properties(mut self, properties: &'a dyn ToPropertyMap) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Call-site coordinates for the record.
    pub fn at(mut self, method_name: &'a str, file: &'a str, line: u32) -> Self {
        self.method_name = Some(method_name);
        self.file = Some(file);
        self.line = Some(line);
        self
    }
}

/// Vendor-neutral logging entry point.
///
/// Owns one configuration, one provider and (when default properties
/// are configured) one process-wide default context. A `Logger` is
/// `Send + Sync` and is meant to be shared behind an `Arc` by any
/// number of threads; per-thread ambient state lives in
/// [`crate::ambient`], not here.
///
/// A log call never returns an error and never panics on behalf of the
/// backend: the only failure signal is the returned nil event id.
pub struct Logger {
    provider: Arc<dyn LogProvider>,
    provider_name: &'static str,
    resolver: ContextResolver,
    username: Arc<dyn UsernameSource>,
    time: Arc<dyn TimeSource>,
    config: LoggerConfig,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// The active ambient correlation id as the pipeline would resolve
    /// it, for transport code that propagates ids across process
    /// boundaries.
    pub fn active_correlation_id(&self) -> Option<Uuid> {
        self.resolver.active_correlation_id()
    }

    /// The active ambient extended properties, empty when no source has
    /// any.
    pub fn active_extended_properties(&self) -> Vec<ExtendedProperty> {
        self.resolver.active_extended_properties().unwrap_or_default()
    }

    /// Run one call through the pipeline.
    ///
    /// **Returns**
    /// - the freshly generated event id of the dispatched record, or
    /// - `Uuid::nil()` when the level was disabled or the provider
    ///   failed. Provider errors never propagate to the caller.
    pub fn log(&self, entry: LogEntry<'_>) -> Uuid {
        if !self.config.skip_level_enabled_check && !self.provider.is_level_enabled(entry.level) {
            return Uuid::nil();
        }

        let (properties, extended_correlation_id) =
            self.calculate_extended_properties(entry.properties);

        let correlation_id = entry
            .correlation_id
            .or(extended_correlation_id)
            .or_else(|| self.resolver.active_correlation_id());

        let sequence_number = if self.config.use_sequence_numbers {
            SequenceCounter::global().next()
        } else {
            0
        };

        let event_id = Uuid::new_v4();
        let record = LogRecord {
            timestamp: self.time.utc_now(),
            event_id,
            sequence_number,
            correlation_id,
            level: entry.level,
            message: format_message(entry.message, &entry.args),
            username: self.username.username(),
            machine_name: self.config.machine_name.clone(),
            process_id: self.config.process_id,
            process_name: self.config.process_name.clone(),
            error: entry.error.map(|e| e.to_string()),
            method_name: entry.method_name.map(str::to_string),
            file: entry.file.map(str::to_string),
            line: entry.line,
            properties,
        };

        match self.provider.log_entry(&record) {
            Ok(()) => event_id,
            Err(error) => {
                if self.config.internal_diagnostics {
                    tracing::warn!(
                        target: "ambient_log",
                        provider = self.provider_name,
                        %error,
                        "log provider rejected record"
                    );
                }
                Uuid::nil()
            }
        }
    }

    /// Merge ambient and per-call properties into the set emitted on
    /// the record, extracting any reserved-key correlation id override
    /// along the way.
    ///
    /// The ambient contribution is skipped when the thread context has
    /// property inheritance turned off. Per-call entries overwrite
    /// ambient entries of the same (case-insensitive) name, and a
    /// per-call reserved-key value beats an ambient one.
    fn calculate_extended_properties(
        &self,
        per_call: Option<&dyn ToPropertyMap>,
    ) -> (PropertySet, Option<Uuid>) {
        let mut set: PropertySet = if self.resolver.inherit_extended_properties() {
            self.resolver
                .active_extended_properties()
                .map(|ambient| ambient.into_iter().collect())
                .unwrap_or_default()
        } else {
            PropertySet::new()
        };
        let mut extended_correlation_id = set.take_correlation_id();

        if let Some(object) = per_call {
            for property in object.to_property_map() {
                set.insert(property.name, property.value);
            }
            if let Some(id) = set.take_correlation_id() {
                extended_correlation_id = Some(id);
            }
        }

        (set, extended_correlation_id)
    }

    pub fn trace(&self, message: &str) -> Uuid {
        self.log(LogEntry::new(LogLevel::Trace).message(message))
    }

    pub fn debug(&self, message: &str) -> Uuid {
        self.log(LogEntry::new(LogLevel::Debug).message(message))
    }

    pub fn info(&self, message: &str) -> Uuid {
        self.log(LogEntry::new(LogLevel::Info).message(message))
    }

    pub fn warn(&self, message: &str) -> Uuid {
        self.log(LogEntry::new(LogLevel::Warn).message(message))
    }

    pub fn error(&self, message: &str) -> Uuid {
        self.log(LogEntry::new(LogLevel::Error).message(message))
    }
}
