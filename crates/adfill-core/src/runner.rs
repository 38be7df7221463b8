//! Batch Resume Runner
//!
//! The checkpointed, time-boxed loop: walk the account's ad groups in
//! order, top up each group's creative quota, persist a resume cursor after
//! every group, and interrupt/reschedule when the time budget is spent.
//!
//! Checkpoint protocol:
//! - The cursor stores the id of the group to resume *at* (re-processing
//!   it, not skipping past it). It is written after every finished group and
//!   before an interruption, and deleted after an uninterrupted full pass.
//! - A collaborator failure propagates out of `run()` without writing a
//!   cursor for the in-flight group; the next invocation re-does that group
//!   from scratch.

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::naming::creative_file_name;
use crate::prompt::PromptBuilder;
use crate::report::{RunOutcome, RunReport};
use crate::watchdog::Watchdog;
use adfill_gateways::{
    folder_path, AdGroup, AdsGateway, Clock, CreativeStore, FollowUpScheduler, ImageGateway,
    StateStore,
};
use std::sync::Arc;
use ulid::Ulid;

/// Durable key holding the resume cursor (last processed ad-group id)
pub const CURSOR_KEY: &str = "adfill.last_processed_group";

/// Durable key holding the current invocation's start timestamp
pub const RUN_STARTED_AT_KEY: &str = "adfill.run_started_at";

/// Unique run identifier (ULID, for log correlation only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub Ulid);

impl RunId {
    /// Generate new run id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The collaborator ports one runner is wired to
#[derive(Clone)]
pub struct Collaborators {
    /// Ads platform
    pub ads: Arc<dyn AdsGateway>,
    /// Image and text generation
    pub images: Arc<dyn ImageGateway>,
    /// Creative storage
    pub store: Arc<dyn CreativeStore>,
    /// Durable key-value state
    pub state: Arc<dyn StateStore>,
    /// Follow-up trigger
    pub scheduler: Arc<dyn FollowUpScheduler>,
    /// Wall clock
    pub clock: Arc<dyn Clock>,
}

/// The checkpointed batch runner
pub struct BatchResumeRunner {
    config: RunnerConfig,
    prompts: PromptBuilder,
    ports: Collaborators,
}

impl BatchResumeRunner {
    /// Create a runner, validating and compiling the configuration
    ///
    /// # Errors
    /// `RunnerError::Config` if the configuration is invalid — a bad prompt
    /// mode never reaches the item loop.
    pub fn new(config: RunnerConfig, ports: Collaborators) -> Result<Self, RunnerError> {
        let prompts = config.validate()?;
        Ok(Self {
            config,
            prompts,
            ports,
        })
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Execute one invocation
    ///
    /// # Workflow
    /// 1. Cancel any pending follow-up trigger (idempotent)
    /// 2. Persist the run-start timestamp and fetch the ad-group list
    /// 3. Resolve the start index from the persisted cursor
    /// 4. Process groups in order, checking the watchdog at each boundary
    /// 5. On completion, delete the cursor and cancel the trigger again
    ///
    /// Returns a [`RunReport`]; a watchdog interruption is an `Ok` outcome,
    /// not an error.
    pub async fn run(&self) -> Result<RunReport, RunnerError> {
        let run_id = RunId::new();
        self.ports.scheduler.cancel_pending().await?;

        let watchdog = Watchdog::start(self.ports.clock.clone(), self.config.time_budget_ms);
        self.ports
            .state
            .set(RUN_STARTED_AT_KEY, &watchdog.started_at_ms().to_string())
            .await?;

        let groups = self.ports.ads.list_ad_groups().await?;
        let start_index = self.start_index(&groups).await?;
        tracing::info!(
            %run_id,
            total_groups = groups.len(),
            start_index,
            "starting run"
        );

        let mut report = RunReport::completed();
        for group in &groups[start_index..] {
            if watchdog.exceeded() {
                self.ports.state.set(CURSOR_KEY, group.id.as_str()).await?;
                self.ports.scheduler.schedule_follow_up().await?;
                tracing::info!(
                    %run_id,
                    resume_at = %group.id,
                    elapsed_ms = watchdog.elapsed_ms(),
                    "time budget spent, follow-up scheduled"
                );
                report.outcome = RunOutcome::Interrupted {
                    resume_at: group.id.clone(),
                };
                return Ok(report);
            }

            self.process_group(group, &mut report).await?;
            report.groups_processed += 1;
            // Unconditional: skipped and abandoned groups advance the cursor too
            self.ports.state.set(CURSOR_KEY, group.id.as_str()).await?;
        }

        self.ports.state.delete(CURSOR_KEY).await?;
        self.ports.scheduler.cancel_pending().await?;
        tracing::info!(%run_id, %report, "run completed");
        Ok(report)
    }

    /// Resolve where this invocation starts in the fetched list
    ///
    /// The cursor matches by identifier, not position. A cursor id that is
    /// no longer present in the list restarts from the top — find-index
    /// semantics, not "skip everything".
    async fn start_index(&self, groups: &[AdGroup]) -> Result<usize, RunnerError> {
        let Some(cursor) = self.ports.state.get(CURSOR_KEY).await? else {
            return Ok(0);
        };
        let index = groups
            .iter()
            .position(|g| g.id.as_str() == cursor)
            .unwrap_or(0);
        Ok(index)
    }

    /// Top up one ad group's quota
    ///
    /// Finishes by meeting the quota, by running out of retries, or by the
    /// keywords mode finding nothing to prompt from. All three paths return
    /// `Ok` — only collaborator failures abort the invocation.
    async fn process_group(
        &self,
        group: &AdGroup,
        report: &mut RunReport,
    ) -> Result<(), RunnerError> {
        let existing = self
            .ports
            .store
            .count_creatives(&group.customer_id, &group.id, &self.config.subfolders)
            .await?;
        if existing >= self.config.target_per_group {
            tracing::debug!(ad_group = %group.id, existing, "quota already met");
            report.groups_skipped += 1;
            return Ok(());
        }

        let deficit = self.config.target_per_group - existing;
        let folder = folder_path(
            &group.customer_id,
            &group.id,
            &self.config.generated_subfolder,
        );
        tracing::debug!(ad_group = %group.id, existing, deficit, "filling quota");

        let mut produced = 0usize;
        let mut empty_batches = 0u32;
        while produced < deficit && empty_batches <= self.config.max_empty_batches {
            let Some(prompt) = self
                .prompts
                .build(group, self.ports.ads.as_ref(), self.ports.images.as_ref())
                .await?
            else {
                report.groups_abandoned += 1;
                return Ok(());
            };
            let prompt = match &self.config.prompt_suffix {
                Some(suffix) => format!("{prompt}{suffix}"),
                None => prompt,
            };

            let batch = (deficit - produced).min(self.ports.images.batch_limit());
            let images = self.ports.images.generate_images(&prompt, batch).await?;
            if images.is_empty() {
                empty_batches += 1;
                report.empty_batches += 1;
                tracing::warn!(
                    ad_group = %group.id,
                    empty_batches,
                    "image generation returned an empty batch"
                );
                continue;
            }

            // Every received image counts, even when fewer than requested
            for image in &images {
                let bytes = image.decode()?;
                let file_name =
                    creative_file_name(&group.id, &group.name, self.ports.clock.as_ref());
                self.ports.store.upload(bytes, &file_name, &folder).await?;
            }
            produced += images.len();
            report.images_uploaded += images.len();
        }

        if produced < deficit {
            tracing::warn!(
                ad_group = %group.id,
                produced,
                deficit,
                "abandoning group after repeated empty batches"
            );
            report.groups_abandoned += 1;
        }
        Ok(())
    }
}
