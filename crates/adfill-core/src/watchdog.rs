//! Execution-time watchdog
//!
//! Cooperative: the runner consults [`Watchdog::exceeded`] before starting
//! each ad group and interrupts itself when the budget is spent. A slow item
//! is never interrupted mid-item.

use adfill_gateways::Clock;
use std::sync::Arc;

/// Elapsed-time predicate over an injected clock
#[derive(Clone)]
pub struct Watchdog {
    clock: Arc<dyn Clock>,
    started_at_ms: u64,
    budget_ms: u64,
}

impl Watchdog {
    /// Start the watchdog now, returning it together with the start stamp
    ///
    /// The caller persists the start stamp; the watchdog keeps its own copy
    /// so per-item checks do not re-read durable state.
    #[must_use]
    pub fn start(clock: Arc<dyn Clock>, budget_ms: u64) -> Self {
        let started_at_ms = clock.now_millis();
        Self {
            clock,
            started_at_ms,
            budget_ms,
        }
    }

    /// Milliseconds since the run started
    #[inline]
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.now_millis().saturating_sub(self.started_at_ms)
    }

    /// Whether the budget has been spent
    #[inline]
    #[must_use]
    pub fn exceeded(&self) -> bool {
        self.elapsed_ms() > self.budget_ms
    }

    /// Start timestamp in epoch milliseconds
    #[inline]
    #[must_use]
    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }
}

impl std::fmt::Debug for Watchdog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watchdog")
            .field("started_at_ms", &self.started_at_ms)
            .field("budget_ms", &self.budget_ms)
            .finish_non_exhaustive()
    }
}
