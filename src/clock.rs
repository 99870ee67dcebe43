//! Monotonic time sources for timer accounting
//!
//! The profiler never reads the system clock directly; it consumes a [`Clock`]
//! that returns monotonic fractional-seconds timestamps. Production code uses
//! [`MonotonicClock`]; tests inject a [`ManualClock`] so every interval is
//! exact and no test has to sleep.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Monotonic wall-clock source returning fractional-seconds timestamps.
///
/// Timestamps are relative to an arbitrary per-clock origin; only differences
/// are meaningful. Implementations must be monotonic: `now()` never decreases.
pub trait Clock: fmt::Debug + Send {
    /// Current timestamp in seconds, with sub-millisecond resolution.
    fn now(&self) -> f64;
}

/// Production clock anchored on a `std::time::Instant` fixed at construction.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose timestamps count from now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Deterministic clock advanced explicitly by tests.
///
/// Cloning yields a shared handle: advancing one handle is visible through
/// every clone, including the one boxed inside a profiler. The timestamp is
/// stored as `f64` bits in an atomic so the type stays `Send` without a lock.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock starting at t = 0.0 seconds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current timestamp in seconds.
    pub fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Jump to an absolute timestamp. Callers keep this monotonic.
    pub fn set(&self, timestamp: f64) {
        self.bits.store(timestamp.to_bits(), Ordering::Relaxed);
    }

    /// Advance the clock by `seconds`.
    pub fn advance(&self, seconds: f64) {
        self.set(self.now() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        ManualClock::now(self)
    }
}
