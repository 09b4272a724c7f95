//! Test: shell actions run through the command runner

use crate::helpers::*;
use burrito::core::config::BuildConfig;
use burrito::core::StepState;
use burrito::execution::CommandRunner;
use std::sync::Arc;

fn config_in(dir: &std::path::Path, actions: &str) -> BuildConfig {
    let yaml = format!(
        r#"
theme: "Taco"
paths:
  theme_dist: "{root}/dist/{{{{ theme }}}}/"
actions:
{actions}
"#,
        root = dir.display(),
        actions = actions
    );
    BuildConfig::from_yaml(&yaml).unwrap()
}

#[tokio::test]
async fn test_actions_write_into_theme_dist() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(
        dir.path(),
        r#"  "clean:app": "rm -rf {{ theme_dist }} && mkdir -p {{ theme_dist }}"
  concat: "echo 'app' > {{ theme_dist }}app.js"
  "sass:dev": "echo '{{ env }}' > {{ theme_dist }}app.css""#,
    );

    let runner = CommandRunner::new(Arc::new(config.clone()));
    let summary = run_task(&config, "compile", runner).await;

    assert_run_completed(&summary);
    assert_step_completed(&summary, "clean:app");
    assert_step_completed(&summary, "concat");

    let dist = dir.path().join("dist").join("Taco");
    assert_eq!(std::fs::read_to_string(dist.join("app.js")).unwrap().trim(), "app");
    assert_eq!(std::fs::read_to_string(dist.join("app.css")).unwrap().trim(), "dev");

    // Steps without an action are skipped, not failed
    assert!(matches!(
        step_state(&summary, "postcss"),
        StepState::Skipped { .. }
    ));
}

#[tokio::test]
async fn test_failing_action_stops_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(
        dir.path(),
        r#"  concat: "exit 2"
  postcss: "touch {{ theme_dist }}never""#,
    );

    let runner = CommandRunner::new(Arc::new(config.clone()));
    let summary = run_task(&config, "compile", runner).await;

    assert_run_failed(&summary);
    match step_state(&summary, "concat") {
        StepState::Failed { error, .. } => assert!(error.contains("code 2"), "error: {}", error),
        other => panic!("concat should have failed, got {:?}", other),
    }
    assert_step_pending(&summary, "postcss");
    assert!(!dir.path().join("dist/Taco/never").exists());
}

#[tokio::test]
async fn test_notify_steps_without_action() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path(), r#"  jshint: "true""#);
    config.test = vec!["notify:app".to_string()];

    let runner = CommandRunner::new(Arc::new(config.clone()));
    let summary = run_task(&config, "test", runner).await;

    assert_run_completed(&summary);
    match step_state(&summary, "notify:app") {
        StepState::Completed { output, .. } => {
            assert_eq!(output, "App Built: Your app has been successfully built!")
        }
        other => panic!("notify:app should be completed, got {:?}", other),
    }
}
