//! Sink trait for log output destinations

use super::error::Result;

/// A destination for encoded log lines.
///
/// Every call to `write` receives exactly one complete, newline-terminated
/// record.
pub trait Sink: Send {
    fn write(&mut self, line: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
