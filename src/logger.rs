//! The logger facade
//!
//! `Logger` wraps an [`Engine`] handle and exposes three call shapes per
//! severity:
//!
//! - structured: `info(msg, &[Field])`
//! - formatted: `infof(format_args!(..))`, usually through [`infof!`](crate::infof)
//! - key/value: `infow(msg, &kv![..])`
//!
//! Every shape checks the engine threshold before building the message or
//! converting fields. A `Logger` is immutable; `with_values`, `with_name` and
//! `with_context` return new loggers sharing the same sinks.
//!
//! # Example
//!
//! ```
//! use rust_logger_facade::prelude::*;
//! use rust_logger_facade::{infof, kv};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::from_engine(Engine::builder().sink(sink.clone()).build());
//!
//! let request = logger.with_name("api").with_values(&kv!["request", 7]);
//! request.info("accepted", &[Field::new("bytes", 512)]);
//! infof!(request, "took {}ms", 12);
//! request.warnw("slow", &kv!["threshold_ms", 10]);
//!
//! assert_eq!(sink.lines().len(), 3);
//! ```

use crate::core::{Engine, Field, LogLevel, Result};
use crate::info_logger::{disabled_info_logger, InfoLogger, LevelLogger};
use crate::keyvalue::{handle_fields, Arg};
use crate::options::Options;
use std::fmt;
use std::io;
use std::panic::Location;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Logger {
    engine: Engine,
}

macro_rules! leveled_methods {
    ($level:expr, $plain:ident, $formatted:ident, $keyed:ident) => {
        #[track_caller]
        #[inline]
        pub fn $plain(&self, msg: &str, fields: &[Field]) {
            self.log($level, msg, fields);
        }

        #[track_caller]
        #[inline]
        pub fn $formatted(&self, args: fmt::Arguments<'_>) {
            self.logf($level, args);
        }

        #[track_caller]
        #[inline]
        pub fn $keyed(&self, msg: &str, keys_and_values: &[Arg]) {
            self.logw($level, msg, keys_and_values);
        }
    };
}

impl Logger {
    /// Build a logger from options, named after `opts.name`.
    ///
    /// Invalid level or format strings fall back to info and console; the
    /// only failure is a sink that cannot be opened.
    pub fn new(opts: &Options) -> Result<Logger> {
        let engine = opts.engine()?.named(&opts.name);
        Ok(Logger { engine })
    }

    pub fn from_engine(engine: Engine) -> Logger {
        Logger { engine }
    }

    /// The underlying engine handle
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, msg: &str, fields: &[Field]) {
        if self.engine.enabled_for(level) {
            self.engine.write(level, msg, fields, Some(Location::caller()));
        }
    }

    #[track_caller]
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if self.engine.enabled_for(level) {
            self.engine
                .write(level, &args.to_string(), &[], Some(Location::caller()));
        }
    }

    #[track_caller]
    pub fn logw(&self, level: LogLevel, msg: &str, keys_and_values: &[Arg]) {
        if self.engine.enabled_for(level) {
            let fields = handle_fields(&self.engine, keys_and_values, &[]);
            self.engine.write(level, msg, &fields, Some(Location::caller()));
        }
    }

    leveled_methods!(LogLevel::Debug, debug, debugf, debugw);
    leveled_methods!(LogLevel::Info, info, infof, infow);
    leveled_methods!(LogLevel::Warn, warn, warnf, warnw);
    leveled_methods!(LogLevel::Error, error, errorf, errorw);

    /// Log at DPanic, then panic if the logger was built in development mode
    #[track_caller]
    pub fn dpanic(&self, msg: &str, fields: &[Field]) {
        self.log(LogLevel::DPanic, msg, fields);
        self.escalate_dpanic(msg);
    }

    #[track_caller]
    pub fn dpanicf(&self, args: fmt::Arguments<'_>) {
        let msg = args.to_string();
        self.log(LogLevel::DPanic, &msg, &[]);
        self.escalate_dpanic(&msg);
    }

    #[track_caller]
    pub fn dpanicw(&self, msg: &str, keys_and_values: &[Arg]) {
        self.logw(LogLevel::DPanic, msg, keys_and_values);
        self.escalate_dpanic(msg);
    }

    /// Log at Panic, flush, then panic with `msg`
    #[track_caller]
    pub fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(LogLevel::Panic, msg, fields);
        self.escalate(LogLevel::Panic, msg)
    }

    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        let msg = args.to_string();
        self.log(LogLevel::Panic, &msg, &[]);
        self.escalate(LogLevel::Panic, &msg)
    }

    #[track_caller]
    pub fn panicw(&self, msg: &str, keys_and_values: &[Arg]) -> ! {
        self.logw(LogLevel::Panic, msg, keys_and_values);
        self.escalate(LogLevel::Panic, msg)
    }

    /// Log at Fatal, flush, then exit the process with status 1
    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(LogLevel::Fatal, msg, fields);
        self.escalate(LogLevel::Fatal, msg)
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        let msg = args.to_string();
        self.log(LogLevel::Fatal, &msg, &[]);
        self.escalate(LogLevel::Fatal, &msg)
    }

    #[track_caller]
    pub fn fatalw(&self, msg: &str, keys_and_values: &[Arg]) -> ! {
        self.logw(LogLevel::Fatal, msg, keys_and_values);
        self.escalate(LogLevel::Fatal, msg)
    }

    #[track_caller]
    fn escalate_dpanic(&self, msg: &str) {
        if self.engine.development() {
            self.escalate(LogLevel::Panic, msg);
        }
    }

    /// The record is already written; make it durable, then leave.
    #[track_caller]
    fn escalate(&self, level: LogLevel, msg: &str) -> ! {
        let _ = self.engine.flush();
        if level == LogLevel::Fatal {
            std::process::exit(1);
        }
        panic!("{}", msg)
    }

    /// Info logger gated at numeric level `level`.
    ///
    /// Returns the shared disabled logger when the engine does not write
    /// that level.
    pub fn v(&self, level: i8) -> Arc<dyn InfoLogger> {
        if self.engine.enabled(level) {
            Arc::new(LevelLogger::new(level, self.engine.clone()))
        } else {
            disabled_info_logger()
        }
    }

    /// New logger with the converted pairs appended to the bound fields
    #[track_caller]
    #[must_use]
    pub fn with_values(&self, keys_and_values: &[Arg]) -> Logger {
        let fields = handle_fields(&self.engine, keys_and_values, &[]);
        Logger {
            engine: self.engine.with(&fields),
        }
    }

    /// New logger with `fields` appended to the bound fields
    #[must_use]
    pub fn with_fields(&self, fields: &[Field]) -> Logger {
        Logger {
            engine: self.engine.with(fields),
        }
    }

    /// New logger named `parent.name`
    #[must_use]
    pub fn with_name(&self, name: &str) -> Logger {
        Logger {
            engine: self.engine.named(name),
        }
    }

    /// Writer emitting each write as one record at `level`
    pub fn writer_at(&self, level: LogLevel) -> LevelWriter {
        LevelWriter {
            engine: self.engine.clone(),
            level,
        }
    }

    /// Block until every buffered record has reached its sinks
    pub fn flush(&self) -> Result<()> {
        self.engine.flush()
    }
}

impl InfoLogger for Logger {
    fn enabled(&self) -> bool {
        true
    }

    fn info(&self, msg: &str, fields: &[Field]) {
        self.log(LogLevel::Info, msg, fields);
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Info, args);
    }

    fn infow(&self, msg: &str, keys_and_values: &[Arg]) {
        self.logw(LogLevel::Info, msg, keys_and_values);
    }
}

/// Byte sink that turns each write into a record at a fixed level.
///
/// Writes always report the full length; a single trailing newline is
/// dropped from the message.
#[derive(Debug, Clone)]
pub struct LevelWriter {
    engine: Engine,
    level: LogLevel,
}

impl LevelWriter {
    pub fn level(&self) -> LogLevel {
        self.level
    }
}

#[track_caller]
fn write_record(engine: &Engine, level: LogLevel, buf: &[u8]) -> usize {
    if engine.enabled_for(level) {
        let text = String::from_utf8_lossy(buf);
        let msg = text.strip_suffix('\n').unwrap_or(&text);
        let msg = msg.strip_suffix('\r').unwrap_or(msg);
        engine.write(level, msg, &[], Some(Location::caller()));
    }
    buf.len()
}

impl io::Write for LevelWriter {
    #[track_caller]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(write_record(&self.engine, self.level, buf))
    }

    /// Format the whole message first so `writeln!` yields one record
    #[track_caller]
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        write_record(&self.engine, self.level, args.to_string().as_bytes());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.engine.flush().map_err(io::Error::other)
    }
}

impl io::Write for Logger {
    #[track_caller]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(write_record(&self.engine, LogLevel::Info, buf))
    }

    #[track_caller]
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        write_record(&self.engine, LogLevel::Info, args.to_string().as_bytes());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Logger::flush(self).map_err(io::Error::other)
    }
}
