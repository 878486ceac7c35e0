//! Structured logging engine
//!
//! `Engine` is the backend the facade forwards to: it owns the sinks, the
//! encoder and the threshold, and writes fully-formed records. It never
//! panics or exits on behalf of a record; escalation is left to the caller.

use super::{
    encoder::{Encoder, Format, TIME_FORMAT},
    entry::LogEntry,
    error::{LoggerError, Result},
    field::Field,
    level::LogLevel,
    metrics::EngineMetrics,
    sampling::{Sampler, SamplingConfig},
    sink::Sink,
};
use parking_lot::Mutex;
use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

struct EngineCore {
    level: LogLevel,
    encoder: Encoder,
    add_caller: bool,
    stacktrace_level: Option<LogLevel>,
    development: bool,
    sampler: Option<Sampler>,
    sinks: Mutex<Vec<Box<dyn Sink>>>,
    error_sinks: Mutex<Vec<Box<dyn Sink>>>,
    metrics: EngineMetrics,
}

/// Handle to a configured engine.
///
/// Cloning is cheap: the core (sinks, encoder, threshold) is shared, while
/// the name and bound fields belong to the handle. `with` and `named` return
/// new handles and never modify the receiver.
#[derive(Clone)]
pub struct Engine {
    core: Arc<EngineCore>,
    name: Option<Arc<str>>,
    fields: Arc<[Field]>,
}

impl Engine {
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Minimum level this engine writes
    pub fn level(&self) -> LogLevel {
        self.core.level
    }

    /// Whether records at the numeric level `level` would be written.
    ///
    /// A single comparison; safe to call on hot paths before building any
    /// message or field.
    #[inline]
    pub fn enabled(&self, level: i8) -> bool {
        level >= self.core.level.as_i8()
    }

    #[inline]
    pub fn enabled_for(&self, level: LogLevel) -> bool {
        self.enabled(level.as_i8())
    }

    pub fn development(&self) -> bool {
        self.core.development
    }

    pub fn format(&self) -> Format {
        self.core.encoder.format
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Fields bound to this handle, in the order they were added
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.core.metrics
    }

    /// New handle with `fields` appended to the bound fields
    #[must_use]
    pub fn with(&self, fields: &[Field]) -> Engine {
        if fields.is_empty() {
            return self.clone();
        }
        let combined: Vec<Field> = self.fields.iter().chain(fields).cloned().collect();
        Engine {
            core: Arc::clone(&self.core),
            name: self.name.clone(),
            fields: combined.into(),
        }
    }

    /// New handle whose name is `parent.name`, or `name` if unnamed
    #[must_use]
    pub fn named(&self, name: &str) -> Engine {
        if name.is_empty() {
            return self.clone();
        }
        let full = match self.name.as_deref() {
            Some(parent) => format!("{}.{}", parent, name),
            None => name.to_string(),
        };
        Engine {
            core: Arc::clone(&self.core),
            name: Some(full.into()),
            fields: Arc::clone(&self.fields),
        }
    }

    /// Encode and write one record to every sink.
    ///
    /// Records below the threshold or suppressed by the sampler are dropped
    /// silently. Sink failures are reported on the error sinks.
    pub fn write(
        &self,
        level: LogLevel,
        message: &str,
        fields: &[Field],
        caller: Option<&Location<'_>>,
    ) {
        if !self.enabled_for(level) {
            return;
        }
        if let Some(ref sampler) = self.core.sampler {
            if !sampler.sample(level, message) {
                self.core.metrics.record_sampled_out();
                return;
            }
        }

        let mut all_fields = Vec::with_capacity(self.fields.len() + fields.len());
        all_fields.extend_from_slice(&self.fields);
        all_fields.extend_from_slice(fields);

        let mut entry = LogEntry::new(level, message)
            .with_logger_name(self.name())
            .with_fields(all_fields);
        if self.core.add_caller {
            if let Some(location) = caller {
                entry = entry.with_caller(location);
            }
        }
        if self.core.stacktrace_level.is_some_and(|min| level >= min) {
            entry = entry.with_stacktrace(Backtrace::force_capture().to_string());
        }

        let line = self.core.encoder.encode(&entry);

        let mut sinks = self.core.sinks.lock();
        for sink in sinks.iter_mut() {
            if let Err(e) = sink.write(line.as_bytes()) {
                self.report_error(sink.name(), &e);
            }
        }
        self.core.metrics.record_written();
    }

    /// Flush every sink, returning the first failure after trying them all
    pub fn flush(&self) -> Result<()> {
        let mut first_err = None;
        {
            let mut sinks = self.core.sinks.lock();
            for sink in sinks.iter_mut() {
                if let Err(e) = sink.flush() {
                    self.report_error(sink.name(), &e);
                    first_err.get_or_insert(e);
                }
            }
        }
        for sink in self.core.error_sinks.lock().iter_mut() {
            let _ = sink.flush();
        }
        first_err.map_or(Ok(()), Err)
    }

    fn report_error(&self, sink_name: &str, err: &LoggerError) {
        self.core.metrics.record_write_error();
        let line = format!(
            "{} write error ({}): {}\n",
            chrono::Local::now().format(TIME_FORMAT),
            sink_name,
            err
        );
        for sink in self.core.error_sinks.lock().iter_mut() {
            let _ = sink.write(line.as_bytes());
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("level", &self.core.level)
            .field("format", &self.core.encoder.format)
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Builder for constructing an Engine with a fluent API
///
/// # Example
/// ```
/// use rust_logger_facade::core::{Engine, Format, LogLevel};
/// use rust_logger_facade::sinks::MemorySink;
///
/// let sink = MemorySink::new();
/// let engine = Engine::builder()
///     .min_level(LogLevel::Debug)
///     .format(Format::Json)
///     .sink(sink.clone())
///     .build();
///
/// engine.write(LogLevel::Info, "ready", &[], None);
/// assert!(sink.contents().contains("\"message\":\"ready\""));
/// ```
pub struct EngineBuilder {
    min_level: LogLevel,
    format: Format,
    use_colors: bool,
    add_caller: bool,
    stacktrace_level: Option<LogLevel>,
    development: bool,
    sampling: Option<SamplingConfig>,
    sinks: Vec<Box<dyn Sink>>,
    error_sinks: Vec<Box<dyn Sink>>,
}

impl EngineBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            format: Format::Console,
            use_colors: false,
            add_caller: false,
            stacktrace_level: None,
            development: false,
            sampling: None,
            sinks: Vec::new(),
            error_sinks: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Colorize level names; only honored by the console format
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Record the call site of each record
    #[must_use = "builder methods return a new value"]
    pub fn add_caller(mut self, add_caller: bool) -> Self {
        self.add_caller = add_caller;
        self
    }

    /// Capture a stack trace for records at or above `level`
    #[must_use = "builder methods return a new value"]
    pub fn stacktrace_level(mut self, level: Option<LogLevel>) -> Self {
        self.stacktrace_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sampling(mut self, sampling: Option<SamplingConfig>) -> Self {
        self.sampling = sampling;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_sinks(mut self, sinks: Vec<Box<dyn Sink>>) -> Self {
        self.sinks.extend(sinks);
        self
    }

    /// Destination for the engine's own write failures
    #[must_use = "builder methods return a new value"]
    pub fn error_sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.error_sinks.push(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_error_sinks(mut self, sinks: Vec<Box<dyn Sink>>) -> Self {
        self.error_sinks.extend(sinks);
        self
    }

    pub fn build(self) -> Engine {
        let use_colors = self.use_colors && self.format == Format::Console;
        Engine {
            core: Arc::new(EngineCore {
                level: self.min_level,
                encoder: Encoder::new(self.format, use_colors),
                add_caller: self.add_caller,
                stacktrace_level: self.stacktrace_level,
                development: self.development,
                sampler: self.sampling.map(Sampler::new),
                sinks: Mutex::new(self.sinks),
                error_sinks: Mutex::new(self.error_sinks),
                metrics: EngineMetrics::new(),
            }),
            name: None,
            fields: Arc::from(Vec::new()),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
