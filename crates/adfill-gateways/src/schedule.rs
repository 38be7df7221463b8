//! Follow-up scheduler port
//!
//! When the watchdog interrupts a run, the runner schedules exactly one
//! follow-up invocation of itself; at the start and end of every run it
//! cancels whatever is pending. Cancellation is idempotent.

use crate::error::GatewayError;
use async_trait::async_trait;
use parking_lot::Mutex;

/// Self-rescheduling trigger for the batch job
#[async_trait]
pub trait FollowUpScheduler: Send + Sync {
    /// Schedule one follow-up invocation
    async fn schedule_follow_up(&self) -> Result<(), GatewayError>;

    /// Cancel any pending follow-up (no-op if none exists)
    async fn cancel_pending(&self) -> Result<(), GatewayError>;
}

/// In-memory scheduler that records trigger activity
#[derive(Debug, Default)]
pub struct CountingScheduler {
    inner: Mutex<SchedulerState>,
}

#[derive(Debug, Default)]
struct SchedulerState {
    pending: bool,
    scheduled_total: usize,
    cancelled_total: usize,
}

impl CountingScheduler {
    /// Create scheduler with nothing pending
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a follow-up is currently pending
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.inner.lock().pending
    }

    /// Total follow-ups ever scheduled
    #[inline]
    #[must_use]
    pub fn scheduled_total(&self) -> usize {
        self.inner.lock().scheduled_total
    }

    /// Total cancel calls ever made
    #[inline]
    #[must_use]
    pub fn cancelled_total(&self) -> usize {
        self.inner.lock().cancelled_total
    }
}

#[async_trait]
impl FollowUpScheduler for CountingScheduler {
    async fn schedule_follow_up(&self) -> Result<(), GatewayError> {
        let mut state = self.inner.lock();
        state.pending = true;
        state.scheduled_total += 1;
        Ok(())
    }

    async fn cancel_pending(&self) -> Result<(), GatewayError> {
        let mut state = self.inner.lock();
        state.pending = false;
        state.cancelled_total += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schedule_then_cancel() {
        let scheduler = CountingScheduler::new();
        assert!(!scheduler.has_pending());

        scheduler.schedule_follow_up().await.unwrap();
        assert!(scheduler.has_pending());
        assert_eq!(scheduler.scheduled_total(), 1);

        scheduler.cancel_pending().await.unwrap();
        assert!(!scheduler.has_pending());
    }

    #[tokio::test]
    async fn cancel_without_pending_is_noop() {
        let scheduler = CountingScheduler::new();
        scheduler.cancel_pending().await.unwrap();
        assert!(!scheduler.has_pending());
        assert_eq!(scheduler.cancelled_total(), 1);
    }
}
