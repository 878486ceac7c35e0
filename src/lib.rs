//! # Rust Logger Facade
//!
//! A leveled, structured logging facade over a configurable engine.
//!
//! ## Features
//!
//! - **Three call shapes**: typed fields, lazily formatted messages and
//!   alternating key/value lists at every severity
//! - **Verbosity gating**: `v(n)` hands out a shared disabled logger below
//!   the threshold, so disabled calls cost one comparison
//! - **Derived loggers**: names, bound fields and request context without
//!   touching the parent
//! - **Process default**: lock-free access to a replaceable default logger,
//!   with the `log` crate routed through it
//! - **Console or JSON** output to stdout, stderr and files
//!
//! ```no_run
//! use rust_logger_facade::{global, kv, Options};
//!
//! let opts = Options {
//!     level: "debug".to_string(),
//!     format: "json".to_string(),
//!     ..Options::default()
//! };
//! opts.build().expect("stdout is always available");
//!
//! global::infow("started", &kv!["version", "1.0"]);
//! log::warn!("legacy callers land here too");
//! ```

pub mod context;
pub mod core;
pub mod global;
pub mod info_logger;
pub mod keyvalue;
pub mod legacy;
pub mod logger;
pub mod macros;
pub mod options;
pub mod sinks;

pub mod prelude {
    pub use crate::context::{Context, KEY_REQUEST_ID, KEY_USERNAME, KEY_WATCHER_NAME};
    pub use crate::core::{
        Engine, EngineBuilder, Field, FieldValue, Format, LogLevel, LoggerError, Result,
        SamplingConfig, Sink,
    };
    pub use crate::info_logger::InfoLogger;
    pub use crate::keyvalue::Arg;
    pub use crate::logger::{LevelWriter, Logger};
    pub use crate::options::Options;
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};
}

pub use context::{Context, KEY_REQUEST_ID, KEY_USERNAME, KEY_WATCHER_NAME, WELL_KNOWN_KEYS};
pub use core::{
    Encoder, Engine, EngineBuilder, EngineMetrics, Field, FieldValue, Format, LogEntry, LogLevel,
    LoggerError, Result, Sampler, SamplingConfig, Sink,
};
pub use global::{default_logger, init, replace_default, std_error_writer, std_info_writer};
pub use info_logger::{disabled_info_logger, InfoLogger, LevelLogger, NoopInfoLogger};
pub use keyvalue::{handle_fields, Arg};
pub use logger::{LevelWriter, Logger};
pub use options::Options;
pub use sinks::{ConsoleSink, FileSink, MemorySink};
