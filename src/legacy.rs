//! Bridge from the `log` crate macros to the default logger
//!
//! After [`redirect`], `log::info!` and friends produce records on whatever
//! logger is the current default, including ones installed later.

use crate::core::{Field, LogLevel};
use crate::global::default_logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static INSTALL: Once = Once::new();
static ACTIVE: AtomicBool = AtomicBool::new(false);

struct Bridge;

static BRIDGE: Bridge = Bridge;

impl log::Log for Bridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        default_logger()
            .engine()
            .enabled_for(LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let logger = default_logger();
        let level = LogLevel::from(record.level());
        if !logger.engine().enabled_for(level) {
            return;
        }

        let mut fields = vec![Field::new("target", record.target())];
        if let (Some(file), Some(line)) = (record.file(), record.line()) {
            fields.push(Field::new("source", format!("{}:{}", file, line)));
        }

        logger
            .engine()
            .write(level, &record.args().to_string(), &fields, None);
    }

    fn flush(&self) {
        let _ = default_logger().flush();
    }
}

/// Route `log` records at `level` and above to the default logger.
///
/// The bridge is registered once per process; later calls only move the
/// level threshold. Returns false if another `log` implementation was
/// registered first.
pub fn redirect(level: LogLevel) -> bool {
    INSTALL.call_once(|| {
        let installed = log::set_logger(&BRIDGE).is_ok();
        ACTIVE.store(installed, Ordering::Release);
    });

    let active = ACTIVE.load(Ordering::Acquire);
    if active {
        log::set_max_level(level.to_level_filter());
    }
    active
}

/// Whether `log` records currently reach the default logger
pub fn is_redirected() -> bool {
    ACTIVE.load(Ordering::Acquire)
}
