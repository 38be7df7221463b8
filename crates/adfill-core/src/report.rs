//! Run reporting
//!
//! Counters summarizing one invocation, returned to the caller and printed
//! by the CLI.

use adfill_gateways::AdGroupId;
use serde::{Deserialize, Serialize};

/// How an invocation ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Every ad group was handled; the cursor was cleared
    Completed,
    /// The watchdog fired; a follow-up was scheduled to resume here
    Interrupted {
        /// Cursor persisted for the next invocation
        resume_at: AdGroupId,
    },
}

/// Summary of one runner invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// How the invocation ended
    pub outcome: RunOutcome,
    /// Ad groups handled this invocation (including skips and abandons)
    pub groups_processed: usize,
    /// Groups whose quota was already met (no generation attempted)
    pub groups_skipped: usize,
    /// Groups abandoned (retries exhausted, or keywords mode found nothing)
    pub groups_abandoned: usize,
    /// Images uploaded this invocation
    pub images_uploaded: usize,
    /// Empty generation batches observed this invocation
    pub empty_batches: usize,
}

impl RunReport {
    /// Create an empty report that completed
    #[inline]
    #[must_use]
    pub fn completed() -> Self {
        Self {
            outcome: RunOutcome::Completed,
            groups_processed: 0,
            groups_skipped: 0,
            groups_abandoned: 0,
            images_uploaded: 0,
            empty_batches: 0,
        }
    }

    /// Check whether the run completed the full list
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, RunOutcome::Completed)
    }

    /// Cursor the next invocation resumes at, if interrupted
    #[inline]
    #[must_use]
    pub fn resume_at(&self) -> Option<&AdGroupId> {
        match &self.outcome {
            RunOutcome::Completed => None,
            RunOutcome::Interrupted { resume_at } => Some(resume_at),
        }
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let outcome = match &self.outcome {
            RunOutcome::Completed => "completed".to_string(),
            RunOutcome::Interrupted { resume_at } => {
                format!("interrupted (resume at {resume_at})")
            }
        };
        write!(
            f,
            "{outcome}: {} groups processed, {} skipped, {} abandoned, {} images uploaded, {} empty batches",
            self.groups_processed,
            self.groups_skipped,
            self.groups_abandoned,
            self.images_uploaded,
            self.empty_batches
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_report_has_no_resume_point() {
        let report = RunReport::completed();
        assert!(report.is_completed());
        assert_eq!(report.resume_at(), None);
    }

    #[test]
    fn interrupted_report_carries_cursor() {
        let mut report = RunReport::completed();
        report.outcome = RunOutcome::Interrupted {
            resume_at: AdGroupId::new("7"),
        };
        assert!(!report.is_completed());
        assert_eq!(report.resume_at().unwrap().as_str(), "7");
        assert!(report.to_string().contains("resume at 7"));
    }
}
