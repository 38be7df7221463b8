//! Functional tests for the checkpoint/resume loop.
//!
//! These exercise the BatchResumeRunner end to end over the in-memory
//! adapters:
//! - the cursor resumes at (not after) the persisted identifier
//! - an absent cursor starts from index 0
//! - an uninterrupted full pass deletes the cursor
//! - a watchdog interruption persists the cursor and schedules exactly one
//!   follow-up, and repeated invocations converge to completion

use adfill_core::{run_simulation, RunOutcome, RunnerConfig, SimulationConfig, CURSOR_KEY};
use adfill_gateways::{ManualClock, ScriptedImageGateway, StateStore as _};
use adfill_test_utils::{
    make_ads_gateway, name_prompt_config, setup_default_rig, setup_runner_with_clock,
    TEST_EPOCH_MS,
};
use pretty_assertions::assert_eq;

/// Tenet: the end-to-end example — two groups, target 2, generator yielding
/// 2 per call — uploads 2 creatives per group and leaves no cursor behind.
#[tokio::test]
async fn uninterrupted_run_fills_everything_and_clears_state() {
    let rig = setup_default_rig(2);

    let report = rig.runner.run().await.unwrap();

    assert!(report.is_completed());
    assert_eq!(report.groups_processed, 2);
    assert_eq!(report.images_uploaded, 4);
    assert_eq!(rig.store.folder_contents("acct/1/generated").len(), 2);
    assert_eq!(rig.store.folder_contents("acct/2/generated").len(), 2);
    assert_eq!(rig.state.get(CURSOR_KEY).await.unwrap(), None);
    assert!(!rig.scheduler.has_pending());
}

/// Tenet: with no cursor persisted, processing begins at index 0 — every
/// group sees uploads.
#[tokio::test]
async fn absent_cursor_starts_from_index_zero() {
    let rig = setup_default_rig(3);

    rig.runner.run().await.unwrap();

    for id in ["1", "2", "3"] {
        assert_eq!(
            rig.store.folder_contents(&format!("acct/{id}/generated")).len(),
            2,
            "group {id} should have been processed"
        );
    }
}

/// Tenet: resumption starts at the cursor identifier, re-processing that
/// group, and never touches the groups before it.
#[tokio::test]
async fn cursor_resumes_at_not_after_the_identifier() {
    let rig = setup_default_rig(3);
    rig.state.set(CURSOR_KEY, "2").await.unwrap();

    let report = rig.runner.run().await.unwrap();

    assert_eq!(report.groups_processed, 2);
    assert_eq!(rig.store.folder_contents("acct/1/generated").len(), 0);
    assert_eq!(rig.store.folder_contents("acct/2/generated").len(), 2);
    assert_eq!(rig.store.folder_contents("acct/3/generated").len(), 2);
    // The completed pass clears the cursor again
    assert_eq!(rig.state.get(CURSOR_KEY).await.unwrap(), None);
}

/// Tenet: a cursor identifier that no longer exists in the fetched list is a
/// full restart, not a skip-everything.
#[tokio::test]
async fn stale_cursor_restarts_from_the_top() {
    let rig = setup_default_rig(2);
    rig.state.set(CURSOR_KEY, "no-longer-listed").await.unwrap();

    let report = rig.runner.run().await.unwrap();

    assert_eq!(report.groups_processed, 2);
    assert_eq!(rig.store.folder_contents("acct/1/generated").len(), 2);
}

/// Tenet: when the budget is already spent at the first group boundary, the
/// run persists that group's id, schedules exactly one follow-up, and
/// processes nothing.
#[tokio::test]
async fn spent_budget_interrupts_before_any_work() {
    let config = RunnerConfig::new()
        .with_target(2)
        .with_prompt(name_prompt_config())
        .with_time_budget_ms(1_000);
    // Every clock read costs more than the whole budget
    let clock = ManualClock::starting_at(TEST_EPOCH_MS).with_step(1_001);
    let rig = setup_runner_with_clock(
        config,
        make_ads_gateway(2),
        ScriptedImageGateway::new(2),
        clock,
    );

    let report = rig.runner.run().await.unwrap();

    assert_eq!(
        report.outcome,
        RunOutcome::Interrupted {
            resume_at: "1".into()
        }
    );
    assert_eq!(report.groups_processed, 0);
    assert_eq!(rig.store.total_stored(), 0);
    assert!(rig.scheduler.has_pending());
    assert_eq!(rig.scheduler.scheduled_total(), 1);
    assert_eq!(
        rig.state.get(CURSOR_KEY).await.unwrap(),
        Some("1".to_string())
    );
}

/// Tenet: an interrupted account converges across repeated invocations — the
/// simulated trigger keeps re-running until the runner reports completion,
/// and every quota ends up met with the cursor cleared.
#[tokio::test]
async fn interrupted_runs_converge_across_invocations() {
    let config = SimulationConfig {
        seed: 7,
        groups: 10,
        target_per_group: 3,
        time_budget_ms: 8_000,
        ..Default::default()
    };

    let report = run_simulation(config).await.unwrap();

    assert!(report.passed(), "{}", report.generate_text());
    assert!(
        report.invocations.len() > 1,
        "expected the watchdog to split the work across invocations"
    );
    // Every invocation except the last was an interruption with a resume point
    for run in &report.invocations[..report.invocations.len() - 1] {
        assert!(run.resume_at().is_some());
    }
    assert!(report.invocations.last().unwrap().is_completed());
}
