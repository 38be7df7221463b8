//! Testing utilities for the Adfill workspace
//!
//! Shared fixtures and a pre-wired runner bundle over the in-memory
//! adapters.

#![allow(missing_docs)]

use adfill_core::{BatchResumeRunner, Collaborators, PromptConfig, RunnerConfig};
use adfill_gateways::{
    AdGroup, CountingScheduler, FixtureAdsGateway, InMemoryCreativeStore, InMemoryStateStore,
    ManualClock, ScriptedImageGateway,
};
use std::sync::Arc;

/// Epoch-millisecond start time every manual clock in the fixtures uses.
pub const TEST_EPOCH_MS: u64 = 1_700_000_000_000;

/// A runner wired to in-memory adapters, with typed handles kept for
/// assertions.
pub struct TestRig {
    pub runner: BatchResumeRunner,
    pub images: Arc<ScriptedImageGateway>,
    pub store: Arc<InMemoryCreativeStore>,
    pub state: Arc<InMemoryStateStore>,
    pub scheduler: Arc<CountingScheduler>,
    pub clock: Arc<ManualClock>,
}

/// Ad group fixture: id `n`, name `"<name> Ad"`, account `"acct"`.
pub fn make_ad_group(id: &str, name: &str) -> AdGroup {
    AdGroup::new(id, format!("{name} Ad"), "acct")
}

/// Ads fixture with `count` groups named `Group-1 Ad` .. `Group-count Ad`,
/// ids `"1"` .. `"count"`.
pub fn make_ads_gateway(count: usize) -> FixtureAdsGateway {
    let mut ads = FixtureAdsGateway::new();
    for i in 1..=count {
        ads = ads.with_group(make_ad_group(&i.to_string(), &format!("Group-{i}")));
    }
    ads
}

/// Keywords-mode prompt configuration used across tests.
pub fn keywords_prompt_config() -> PromptConfig {
    PromptConfig::Keywords {
        context: "You write image prompts.".to_string(),
        prefix: "Themes: ".to_string(),
        suffix: ".".to_string(),
    }
}

/// Name-mode prompt configuration matching `"<product> Ad"` fixture names.
pub fn name_prompt_config() -> PromptConfig {
    PromptConfig::AdGroup {
        name_pattern: r"^(?P<product>.+) Ad$".to_string(),
        template: "A photo of ${product}".to_string(),
        default_prompt: "A product photo".to_string(),
    }
}

/// Wire a runner over in-memory adapters with a clock pinned at
/// [`TEST_EPOCH_MS`].
///
/// Panics on an invalid configuration — fixtures are supposed to be valid.
pub fn setup_runner(
    config: RunnerConfig,
    ads: FixtureAdsGateway,
    images: ScriptedImageGateway,
) -> TestRig {
    setup_runner_with_clock(config, ads, images, ManualClock::starting_at(TEST_EPOCH_MS))
}

/// Wire a runner over in-memory adapters with the given clock.
///
/// Pass a stepped clock (`ManualClock::with_step`) to make simulated work
/// cost simulated time, e.g. to drive the watchdog in tests.
pub fn setup_runner_with_clock(
    config: RunnerConfig,
    ads: FixtureAdsGateway,
    images: ScriptedImageGateway,
    clock: ManualClock,
) -> TestRig {
    let images = Arc::new(images);
    let store = Arc::new(InMemoryCreativeStore::new());
    let state = Arc::new(InMemoryStateStore::new());
    let scheduler = Arc::new(CountingScheduler::new());
    let clock = Arc::new(clock);

    let runner = BatchResumeRunner::new(
        config,
        Collaborators {
            ads: Arc::new(ads),
            images: images.clone(),
            store: store.clone(),
            state: state.clone(),
            scheduler: scheduler.clone(),
            clock: clock.clone(),
        },
    )
    .expect("test fixture configuration must be valid");

    TestRig {
        runner,
        images,
        store,
        state,
        scheduler,
        clock,
    }
}

/// Default rig: `groups` fixture ad groups, name-mode prompts, quota of 2,
/// generator yielding 2 images per call.
pub fn setup_default_rig(groups: usize) -> TestRig {
    let config = RunnerConfig::new()
        .with_target(2)
        .with_prompt(name_prompt_config());
    setup_runner(config, make_ads_gateway(groups), ScriptedImageGateway::new(2))
}
