//! Logging macros
//!
//! [`kv!`](crate::kv) builds the alternating key/value list taken by the `*w`
//! methods. The `*f!` macros wrap `format_args!` so the message is only
//! formatted when the record is written; a leading string literal logs
//! through the default logger, a leading expression through that logger.
//!
//! # Examples
//!
//! ```
//! use rust_logger_facade::prelude::*;
//! use rust_logger_facade::{infof, kv, warnf};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::from_engine(Engine::builder().sink(sink.clone()).build());
//!
//! let port = 8080;
//! infof!(logger, "listening on port {}", port);
//! warnf!(logger, "{} retries left", 2);
//! logger.infow("accepted", &kv!["peer", "10.0.0.1", "bytes", 512]);
//!
//! assert_eq!(sink.lines().len(), 3);
//! ```

/// Build a `[Arg; N]` from alternating keys and values.
///
/// ```
/// use rust_logger_facade::{kv, Arg};
///
/// let args = kv!["user", "alice", "attempt", 3];
/// assert_eq!(args.len(), 4);
/// assert_eq!(args[0], Arg::from("user"));
/// ```
#[macro_export]
macro_rules! kv {
    () => {
        [] as [$crate::Arg; 0]
    };
    ($($x:expr),+ $(,)?) => {
        [$($crate::Arg::from($x)),+]
    };
}

/// Formatted debug record.
#[macro_export]
macro_rules! debugf {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::debugf(format_args!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(format_args!($($arg)+))
    };
}

/// Formatted info record.
///
/// ```
/// # use rust_logger_facade::prelude::*;
/// use rust_logger_facade::infof;
///
/// let sink = MemorySink::new();
/// let logger = Logger::from_engine(Engine::builder().sink(sink.clone()).build());
/// infof!(logger, "processing {} items", 100);
/// assert!(sink.contents().contains("processing 100 items"));
/// ```
#[macro_export]
macro_rules! infof {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::infof(format_args!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(format_args!($($arg)+))
    };
}

/// Formatted warn record.
#[macro_export]
macro_rules! warnf {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::warnf(format_args!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(format_args!($($arg)+))
    };
}

/// Formatted error record.
#[macro_export]
macro_rules! errorf {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::errorf(format_args!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(format_args!($($arg)+))
    };
}

/// Formatted dpanic record; panics afterwards in development mode.
#[macro_export]
macro_rules! dpanicf {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::dpanicf(format_args!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.dpanicf(format_args!($($arg)+))
    };
}

/// Formatted panic record, then panic.
#[macro_export]
macro_rules! panicf {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::panicf(format_args!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.panicf(format_args!($($arg)+))
    };
}

/// Formatted fatal record, then exit with status 1.
#[macro_export]
macro_rules! fatalf {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::fatalf(format_args!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(format_args!($($arg)+))
    };
}
