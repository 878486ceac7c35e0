//! Process-wide default logger
//!
//! The default starts as `Logger::new(&Options::default())` and is replaced
//! by [`init`] or [`replace_default`]. Readers load it without locking; a
//! concurrent replacement is seen either entirely or not at all.

use crate::context::Context;
use crate::core::{Engine, Field, LogLevel, Result};
use crate::info_logger::InfoLogger;
use crate::keyvalue::Arg;
use crate::legacy;
use crate::logger::{LevelWriter, Logger};
use crate::options::Options;
use crate::sinks::ConsoleSink;
use arc_swap::ArcSwap;
use parking_lot::{const_mutex, Mutex};
use std::fmt;
use std::sync::{Arc, LazyLock};

static DEFAULT: LazyLock<ArcSwap<Logger>> =
    LazyLock::new(|| ArcSwap::from_pointee(fallback_logger()));

/// Serializes `init` so build-and-publish pairs do not interleave
static INIT_LOCK: Mutex<()> = const_mutex(());

fn fallback_logger() -> Logger {
    Logger::new(&Options::default()).unwrap_or_else(|_| {
        Logger::from_engine(Engine::builder().sink(ConsoleSink::stdout()).build())
    })
}

/// Build a logger from `opts`, publish it as the default and route the `log`
/// crate through it.
///
/// On error the previous default stays in place.
pub fn init(opts: &Options) -> Result<()> {
    let _guard = INIT_LOCK.lock();

    let logger = Logger::new(opts)?;
    let level = logger.engine().level();
    DEFAULT.store(Arc::new(logger));
    legacy::redirect(level);

    Ok(())
}

/// Publish `logger` as the default, returning the one it replaced.
pub fn replace_default(logger: Logger) -> Arc<Logger> {
    DEFAULT.swap(Arc::new(logger))
}

/// Snapshot of the current default logger
pub fn default_logger() -> Arc<Logger> {
    DEFAULT.load_full()
}

macro_rules! global_leveled {
    ($plain:ident, $formatted:ident, $keyed:ident) => {
        #[track_caller]
        pub fn $plain(msg: &str, fields: &[Field]) {
            DEFAULT.load().$plain(msg, fields);
        }

        #[track_caller]
        pub fn $formatted(args: fmt::Arguments<'_>) {
            DEFAULT.load().$formatted(args);
        }

        #[track_caller]
        pub fn $keyed(msg: &str, keys_and_values: &[Arg]) {
            DEFAULT.load().$keyed(msg, keys_and_values);
        }
    };
}

global_leveled!(debug, debugf, debugw);
global_leveled!(info, infof, infow);
global_leveled!(warn, warnf, warnw);
global_leveled!(error, errorf, errorw);
global_leveled!(dpanic, dpanicf, dpanicw);

#[track_caller]
pub fn panic(msg: &str, fields: &[Field]) -> ! {
    default_logger().panic(msg, fields)
}

#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    default_logger().panicf(args)
}

#[track_caller]
pub fn panicw(msg: &str, keys_and_values: &[Arg]) -> ! {
    default_logger().panicw(msg, keys_and_values)
}

#[track_caller]
pub fn fatal(msg: &str, fields: &[Field]) -> ! {
    default_logger().fatal(msg, fields)
}

#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    default_logger().fatalf(args)
}

#[track_caller]
pub fn fatalw(msg: &str, keys_and_values: &[Arg]) -> ! {
    default_logger().fatalw(msg, keys_and_values)
}

pub fn v(level: i8) -> Arc<dyn InfoLogger> {
    DEFAULT.load().v(level)
}

#[track_caller]
pub fn with_values(keys_and_values: &[Arg]) -> Logger {
    DEFAULT.load().with_values(keys_and_values)
}

pub fn with_name(name: &str) -> Logger {
    DEFAULT.load().with_name(name)
}

pub fn with_context(ctx: &Context) -> Logger {
    DEFAULT.load().with_context(ctx)
}

pub fn flush() -> Result<()> {
    DEFAULT.load().flush()
}

/// Writer turning each write into an info record on the default logger
pub fn std_info_writer() -> LevelWriter {
    DEFAULT.load().writer_at(LogLevel::Info)
}

/// Writer turning each write into an error record on the default logger
pub fn std_error_writer() -> LevelWriter {
    DEFAULT.load().writer_at(LogLevel::Error)
}
