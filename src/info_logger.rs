//! Level-gated info logging
//!
//! `InfoLogger` is the minimal logging capability: report whether it is
//! enabled and emit at one fixed level. `Logger::v(n)` hands these out for
//! verbosity-scoped logging.

use crate::core::{Engine, Field, LogLevel};
use crate::keyvalue::{handle_fields, Arg};
use std::fmt;
use std::panic::Location;
use std::sync::{Arc, LazyLock};

pub trait InfoLogger: Send + Sync {
    /// False only for the disabled logger returned by `v` for a level the
    /// engine does not write.
    fn enabled(&self) -> bool;

    #[track_caller]
    fn info(&self, msg: &str, fields: &[Field]);

    /// The message is only formatted if the record will be written.
    #[track_caller]
    fn infof(&self, args: fmt::Arguments<'_>);

    #[track_caller]
    fn infow(&self, msg: &str, keys_and_values: &[Arg]);
}

/// Info logger writing at an arbitrary numeric verbosity level
#[derive(Debug, Clone)]
pub struct LevelLogger {
    level: i8,
    engine: Engine,
}

impl LevelLogger {
    pub fn new(level: i8, engine: Engine) -> Self {
        Self { level, engine }
    }

    pub fn level(&self) -> i8 {
        self.level
    }

    fn record_level(&self) -> LogLevel {
        LogLevel::from_i8_saturating(self.level)
    }
}

impl InfoLogger for LevelLogger {
    fn enabled(&self) -> bool {
        true
    }

    fn info(&self, msg: &str, fields: &[Field]) {
        if self.engine.enabled(self.level) {
            self.engine
                .write(self.record_level(), msg, fields, Some(Location::caller()));
        }
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        if self.engine.enabled(self.level) {
            self.engine.write(
                self.record_level(),
                &args.to_string(),
                &[],
                Some(Location::caller()),
            );
        }
    }

    fn infow(&self, msg: &str, keys_and_values: &[Arg]) {
        if self.engine.enabled(self.level) {
            let fields = handle_fields(&self.engine, keys_and_values, &[]);
            self.engine
                .write(self.record_level(), msg, &fields, Some(Location::caller()));
        }
    }
}

/// Info logger that never writes
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInfoLogger;

impl InfoLogger for NoopInfoLogger {
    fn enabled(&self) -> bool {
        false
    }
    fn info(&self, _msg: &str, _fields: &[Field]) {}
    fn infof(&self, _args: fmt::Arguments<'_>) {}
    fn infow(&self, _msg: &str, _keys_and_values: &[Arg]) {}
}

static DISABLED: LazyLock<Arc<dyn InfoLogger>> = LazyLock::new(|| Arc::new(NoopInfoLogger));

/// The shared disabled logger; every call returns the same instance.
pub fn disabled_info_logger() -> Arc<dyn InfoLogger> {
    Arc::clone(&DISABLED)
}
