//! Seeded in-memory simulation harness
//!
//! Composes the runner entirely out of the in-memory adapters: synthetic ad
//! groups, a scripted image generator, and a stepping clock that advances a
//! fixed amount on every read so the watchdog fires deterministically. The
//! harness drives `run()` repeatedly — exactly the way the platform trigger
//! would — until the runner reports completion, then checks that every
//! group's quota was actually met.
//!
//! Used by the `adfill simulate` CLI subcommand and by integration tests.

use crate::config::{PromptConfig, RunnerConfig};
use crate::error::RunnerError;
use crate::report::RunReport;
use crate::runner::{BatchResumeRunner, Collaborators, CURSOR_KEY};
use adfill_gateways::{
    AdGroup, CountingScheduler, FixtureAdsGateway, InMemoryCreativeStore, InMemoryStateStore,
    ManualClock, ScriptedImageGateway, StateStore as _,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

const PRODUCTS: &[&str] = &[
    "Running Shoes",
    "Leather Boots",
    "Wool Hats",
    "Canvas Bags",
    "Steel Bottles",
    "Desk Lamps",
];

const THEMES: &[&str] = &[
    "Summer",
    "Autumn",
    "Minimalist",
    "Outdoor",
    "City Life",
    "Holiday",
];

/// Simulation configuration
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Number of synthetic ad groups
    pub groups: usize,
    /// Creative quota per group
    pub target_per_group: usize,
    /// Images the scripted generator yields per call
    pub images_per_call: usize,
    /// Image calls that return empty before the generator recovers
    pub empty_batches_first: usize,
    /// Watchdog budget per invocation, in milliseconds
    pub time_budget_ms: u64,
    /// Milliseconds the simulated clock advances on every read
    pub clock_step_ms: u64,
    /// Safety cap on invocations before giving up
    pub max_invocations: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            groups: 12,
            target_per_group: 4,
            images_per_call: 2,
            empty_batches_first: 0,
            time_budget_ms: 30_000,
            clock_step_ms: 1_000,
            max_invocations: 50,
        }
    }
}

/// Final report from a simulation
#[derive(Debug)]
pub struct SimulationReport {
    /// Configuration the simulation ran with
    pub config: SimulationConfig,
    /// One report per invocation, in order
    pub invocations: Vec<RunReport>,
    /// Images uploaded across all invocations
    pub uploads_total: usize,
    /// Uploads the seeded quotas actually required
    pub uploads_expected: usize,
    /// Whether the final invocation completed the full pass
    pub completed: bool,
    /// Whether the cursor was cleared at the end
    pub cursor_cleared: bool,
}

impl SimulationReport {
    /// Check if the simulation met every quota and cleaned up after itself
    #[inline]
    #[must_use]
    pub fn passed(&self) -> bool {
        self.completed && self.cursor_cleared && self.uploads_total == self.uploads_expected
    }

    /// Generate text report
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Adfill Simulation Report\n");
        out.push_str("========================\n\n");
        out.push_str(&format!("Seed: {}\n", self.config.seed));
        out.push_str(&format!("Ad groups: {}\n", self.config.groups));
        out.push_str(&format!("Quota per group: {}\n", self.config.target_per_group));
        out.push_str(&format!("Invocations: {}\n\n", self.invocations.len()));

        for (i, report) in self.invocations.iter().enumerate() {
            out.push_str(&format!("  run {}: {report}\n", i + 1));
        }

        out.push_str(&format!(
            "\nUploads: {} (expected {})\n",
            self.uploads_total, self.uploads_expected
        ));
        out.push_str(&format!(
            "Result: {}\n",
            if self.passed() { "PASS" } else { "FAIL" }
        ));
        out
    }
}

/// Run a full simulation to completion
///
/// # Errors
/// Propagates `RunnerError` from the underlying runner; with the in-memory
/// adapters this only happens on configuration mistakes.
pub async fn run_simulation(config: SimulationConfig) -> Result<SimulationReport, RunnerError> {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let runner_config = RunnerConfig::new()
        .with_target(config.target_per_group)
        .with_time_budget_ms(config.time_budget_ms)
        .with_prompt(PromptConfig::AdGroup {
            name_pattern: r"^(?P<product>.+) - (?P<theme>.+)$".to_string(),
            template: "A high quality advertising photo of ${product}, ${theme} theme".to_string(),
            default_prompt: "A high quality advertising product photo".to_string(),
        });
    // Reject a zero quota or budget before seeding draws on them
    runner_config.validate()?;

    let mut ads = FixtureAdsGateway::new();
    let store = Arc::new(InMemoryCreativeStore::new());
    let mut uploads_expected = 0;

    for i in 0..config.groups {
        let product = PRODUCTS[rng.random_range(0..PRODUCTS.len())];
        let theme = THEMES[rng.random_range(0..THEMES.len())];
        let group = AdGroup::new(
            format!("{}", 1000 + i),
            format!("{product} - {theme}"),
            "sim-account",
        );

        // Roughly a third of the groups already meet their quota
        let pre_seeded = if rng.random_range(0..3) == 0 {
            config.target_per_group
        } else {
            rng.random_range(0..config.target_per_group)
        };
        store.seed(
            &format!("sim-account/{}/generated", group.id),
            pre_seeded,
        );
        uploads_expected += config.target_per_group.saturating_sub(pre_seeded);

        ads = ads.with_group(group);
    }

    let images = Arc::new(
        ScriptedImageGateway::new(config.images_per_call)
            .with_empty_batches_first(config.empty_batches_first),
    );
    let state = Arc::new(InMemoryStateStore::new());
    let scheduler = Arc::new(CountingScheduler::new());
    // Simulated work costs simulated time: the clock advances a fixed step
    // on every read, so the watchdog fires after a deterministic amount of
    // activity instead of wall-clock waiting.
    let clock = Arc::new(ManualClock::starting_at(1_700_000_000_000).with_step(config.clock_step_ms));

    let runner = BatchResumeRunner::new(
        runner_config,
        Collaborators {
            ads: Arc::new(ads),
            images: images.clone(),
            store: store.clone(),
            state: state.clone(),
            scheduler: scheduler.clone(),
            clock: clock.clone(),
        },
    )?;

    let mut invocations = Vec::new();
    let mut completed = false;
    while invocations.len() < config.max_invocations {
        let report = runner.run().await?;
        let done = report.is_completed();
        invocations.push(report);
        if done {
            completed = true;
            break;
        }
    }

    let cursor_cleared = state.get(CURSOR_KEY).await?.is_none();
    let uploads_total = invocations.iter().map(|r| r.images_uploaded).sum();

    Ok(SimulationReport {
        config,
        invocations,
        uploads_total,
        uploads_expected,
        completed,
        cursor_cleared,
    })
}
