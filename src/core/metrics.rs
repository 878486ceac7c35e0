//! Engine metrics for observability
//!
//! Counters shared by every handle derived from one engine.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use rust_logger_facade::core::EngineMetrics;
///
/// let metrics = EngineMetrics::new();
/// metrics.record_written();
/// metrics.record_sampled_out();
///
/// assert_eq!(metrics.written(), 1);
/// assert_eq!(metrics.sampled_out(), 1);
/// ```
#[derive(Debug)]
pub struct EngineMetrics {
    /// Records encoded and handed to the sinks
    written: AtomicU64,

    /// Records suppressed by the sampler
    sampled_out: AtomicU64,

    /// Individual sink writes or flushes that failed
    write_errors: AtomicU64,
}

impl EngineMetrics {
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            sampled_out: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sampled_out(&self) -> u64 {
        self.sampled_out.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_errors(&self) -> u64 {
        self.write_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sampled_out(&self) -> u64 {
        self.sampled_out.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_error(&self) -> u64 {
        self.write_errors.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = EngineMetrics::new();
        assert_eq!(metrics.written(), 0);
        assert_eq!(metrics.sampled_out(), 0);
        assert_eq!(metrics.write_errors(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = EngineMetrics::new();
        assert_eq!(metrics.record_write_error(), 0);
        assert_eq!(metrics.record_write_error(), 1);
        assert_eq!(metrics.write_errors(), 2);
    }
}
