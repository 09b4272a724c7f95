//! Test: failure handling - the run stops at the first failing step

use crate::helpers::*;
use burrito::core::{Environment, StepState};

#[tokio::test]
async fn test_failure_stops_run() {
    let config = config_for(Environment::Production);
    let runner = MockRunner::new().failing_on(&["postcss"]);

    let summary = run_task(&config, "compile", runner.clone()).await;

    assert_run_failed(&summary);
    assert_eq!(runner.calls().last().map(String::as_str), Some("postcss"));
    assert_step_completed(&summary, "sass:prod");

    match step_state(&summary, "postcss") {
        StepState::Failed { error, .. } => assert!(error.contains("MockRunner: postcss failed")),
        other => panic!("postcss should have failed, got {:?}", other),
    }

    for name in ["jshint", "uglify", "clean:scripts", "clean:styles"] {
        assert_step_pending(&summary, name);
    }
    assert_eq!(summary.failed_step().unwrap().step, "postcss");
}

#[tokio::test]
async fn test_failure_on_first_step() {
    let config = config_for(Environment::Development);
    let runner = MockRunner::new().failing_on(&["clean:app"]);

    let summary = run_task(&config, "default", runner.clone()).await;

    assert_run_failed(&summary);
    assert_eq!(runner.calls(), vec!["clean:app"]);
    assert_step_pending(&summary, "watch");
}

#[tokio::test]
async fn test_skipped_steps_do_not_fail_run() {
    let config = config_for(Environment::Development);
    let runner = MockRunner::new().unhandled(&["copy:styles", "copy:scripts"]);

    let summary = run_task(&config, "compile", runner).await;

    assert_run_completed(&summary);
    assert_eq!(summary.skipped_steps(), 2);
}
