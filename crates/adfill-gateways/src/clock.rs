//! Clock port
//!
//! The runner never reads wall-clock time directly; the watchdog and file
//! naming both go through this trait so tests can simulate a timeout without
//! real waiting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock time source in epoch milliseconds
pub trait Clock: Send + Sync {
    /// Current time as milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;
}

/// System clock (production)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create new system clock
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Manually advanced clock for tests and simulation
///
/// Starts at an arbitrary epoch and only moves when told to — or, with
/// [`with_step`](Self::with_step), a fixed amount on every read, so that
/// simulated work costs simulated time and elapsed-time checks stay fully
/// deterministic.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
    step_ms: u64,
}

impl ManualClock {
    /// Create clock pinned at the given epoch milliseconds
    #[inline]
    #[must_use]
    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(now_ms),
            step_ms: 0,
        }
    }

    /// With the clock advancing `step_ms` on every read
    #[inline]
    #[must_use]
    pub fn with_step(mut self, step_ms: u64) -> Self {
        self.step_ms = step_ms;
        self
    }

    /// Advance the clock by `delta_ms` milliseconds
    #[inline]
    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }

    /// Pin the clock to an absolute time
    #[inline]
    pub fn set(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now_ms.fetch_add(self.step_ms, Ordering::SeqCst)
    }
}
