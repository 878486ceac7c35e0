//! Per-second log sampling for repetitive messages
//!
//! Within each one-second window, the first `initial` records carrying a
//! given (level, message) pair are written; after that only every
//! `thereafter`th one is. Distinct messages never affect each other unless
//! their hashes collide in the same bucket.
//!
//! # Example
//!
//! ```
//! use rust_logger_facade::core::{LogLevel, Sampler, SamplingConfig};
//!
//! let sampler = Sampler::new(SamplingConfig { initial: 2, thereafter: 3 });
//! let kept = (0..10)
//!     .filter(|_| sampler.sample(LogLevel::Info, "tick"))
//!     .count();
//! assert_eq!(kept, 4); // records 1, 2, 5 and 8
//! ```

use super::level::LogLevel;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

const BUCKETS_PER_LEVEL: usize = 1024;
const TICK: Duration = Duration::from_secs(1);

/// Configuration for log sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Records per window written unconditionally
    pub initial: u64,
    /// After `initial`, write every Nth record; 0 drops the rest
    pub thereafter: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            initial: 100,
            thereafter: 100,
        }
    }
}

#[derive(Debug, Default)]
struct Counter {
    /// Nanoseconds since sampler creation at which the window ends
    reset_at: AtomicU64,
    count: AtomicU64,
}

impl Counter {
    fn inc_check_reset(&self, now: u64) -> u64 {
        let reset_at = self.reset_at.load(Ordering::Acquire);
        if reset_at > now {
            return self.count.fetch_add(1, Ordering::AcqRel) + 1;
        }

        self.count.store(1, Ordering::Release);
        let next = now + TICK.as_nanos() as u64;
        if self
            .reset_at
            .compare_exchange(reset_at, next, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            // Another thread opened the new window first
            return self.count.fetch_add(1, Ordering::AcqRel) + 1;
        }
        1
    }
}

/// Lock-free sampler shared by every handle derived from one engine
#[derive(Debug)]
pub struct Sampler {
    config: SamplingConfig,
    epoch: Instant,
    counters: Box<[Counter]>,
}

impl Sampler {
    pub fn new(config: SamplingConfig) -> Self {
        let counters = (0..LogLevel::ALL.len() * BUCKETS_PER_LEVEL)
            .map(|_| Counter::default())
            .collect();
        Self {
            config,
            epoch: Instant::now(),
            counters,
        }
    }

    pub fn config(&self) -> SamplingConfig {
        self.config
    }

    /// Whether a record with this level and message should be written
    pub fn sample(&self, level: LogLevel, message: &str) -> bool {
        let level_idx = (level.as_i8() - LogLevel::Debug.as_i8()) as usize;
        let bucket = fnv1a(message.as_bytes()) as usize % BUCKETS_PER_LEVEL;
        let counter = &self.counters[level_idx * BUCKETS_PER_LEVEL + bucket];

        let now = self.epoch.elapsed().as_nanos() as u64;
        let n = counter.inc_check_reset(now);
        if n <= self.config.initial {
            return true;
        }
        self.config.thereafter > 0 && (n - self.config.initial) % self.config.thereafter == 0
    }
}

fn fnv1a(bytes: &[u8]) -> u32 {
    const OFFSET: u32 = 2_166_136_261;
    const PRIME: u32 = 16_777_619;
    bytes
        .iter()
        .fold(OFFSET, |hash, b| (hash ^ u32::from(*b)).wrapping_mul(PRIME))
}
