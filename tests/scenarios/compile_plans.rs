//! Test: compile and default tasks per environment

use crate::helpers::*;
use burrito::core::Environment;

/// Development compile runs the base steps with lint expanded to jshint
#[tokio::test]
async fn test_development_compile() {
    let config = config_for(Environment::Development);
    let runner = MockRunner::new();

    let summary = run_task(&config, "compile", runner.clone()).await;

    assert_run_completed(&summary);
    assert_eq!(
        runner.calls(),
        vec![
            "clean:app",
            "copy:styles",
            "copy:scripts",
            "copy:images",
            "concat",
            "sass:dev",
            "postcss",
            "jshint",
        ]
    );
    assert!(!runner.calls().iter().any(|s| s == "uglify"));
}

/// Production compile ends with the minify/cleanup tail
#[tokio::test]
async fn test_production_compile() {
    let config = config_for(Environment::Production);
    let runner = MockRunner::new();

    let summary = run_task(&config, "compile", runner.clone()).await;

    assert_run_completed(&summary);
    let calls = runner.calls();
    assert!(calls.contains(&"sass:prod".to_string()));
    assert_eq!(
        &calls[calls.len() - 3..],
        ["uglify", "clean:scripts", "clean:styles"]
    );
}

/// The default task compiles, then hands off to the external watcher
#[tokio::test]
async fn test_default_task_ends_with_watch() {
    let config = config_for(Environment::Development);
    let runner = MockRunner::new().unhandled(&["watch"]);

    let summary = run_task(&config, "default", runner.clone()).await;

    assert_run_completed(&summary);
    assert_eq!(step_names(&summary).last().map(String::as_str), Some("watch"));
    assert_eq!(summary.skipped_steps(), 1);
    assert_eq!(summary.completed_steps(), summary.total_steps() - 1);
}

/// Test steps configured for the test task run after lint
#[tokio::test]
async fn test_configured_test_steps() {
    let mut config = config_for(Environment::Development);
    config.test = vec!["karma".to_string(), "notify:scripts".to_string()];
    let runner = MockRunner::new();

    let summary = run_task(&config, "compile", runner.clone()).await;

    assert_run_completed(&summary);
    let calls = runner.calls();
    assert_eq!(&calls[calls.len() - 3..], ["jshint", "karma", "notify:scripts"]);
    assert_step_completed(&summary, "notify:scripts");
}
