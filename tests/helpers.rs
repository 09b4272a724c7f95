//! Test utility functions for burrito
#![allow(dead_code)]

use burrito::core::config::{BuildConfig, Notification};
use burrito::core::registry::TaskRegistry;
use burrito::core::{BuildStep, Environment, ExecutionStatus, RunSummary, StepState};
use burrito::execution::{PlanEngine, StepError, StepOutcome, StepRunner};

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Mock runner that records every step it is handed
#[derive(Clone, Default)]
pub struct MockRunner {
    failing: Arc<HashSet<String>>,
    unhandled: Arc<HashSet<String>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the named steps fail
    pub fn failing_on(mut self, steps: &[&str]) -> Self {
        self.failing = Arc::new(steps.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Report the named steps as having no action
    pub fn unhandled(mut self, steps: &[&str]) -> Self {
        self.unhandled = Arc::new(steps.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Steps handed to the runner so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StepRunner for MockRunner {
    async fn run(&self, step: &BuildStep) -> Result<StepOutcome, StepError> {
        self.calls.lock().unwrap().push(step.to_string());

        if self.failing.contains(step.name()) {
            return Err(StepError::Exit {
                code: 1,
                stderr: format!("MockRunner: {} failed", step),
            });
        }

        if self.unhandled.contains(step.name()) {
            return Ok(StepOutcome::Skipped {
                reason: "no action configured".to_string(),
            });
        }

        if step.task() == "notify" {
            return Ok(StepOutcome::Notified(Notification {
                title: format!("{} notice", step.target().unwrap_or_default()),
                message: "done".to_string(),
            }));
        }

        Ok(StepOutcome::Completed {
            output: format!("ran {}", step),
        })
    }
}

pub fn config_for(env: Environment) -> BuildConfig {
    let mut config = BuildConfig::default();
    config.env = env;
    config
}

/// Expand a task from the registry and run it with the given runner
pub async fn run_task<R: StepRunner>(config: &BuildConfig, task: &str, runner: R) -> RunSummary {
    let plan = TaskRegistry::new(config)
        .expand_task(task)
        .expect("task should expand");
    PlanEngine::new(runner).execute(task, config.env, &plan).await
}

pub fn step_names(summary: &RunSummary) -> Vec<String> {
    summary.steps.iter().map(|r| r.step.to_string()).collect()
}

pub fn assert_run_completed(summary: &RunSummary) {
    assert_eq!(
        summary.status,
        ExecutionStatus::Completed,
        "run should complete, steps: {:?}",
        summary.steps
    );
}

pub fn assert_run_failed(summary: &RunSummary) {
    assert_eq!(summary.status, ExecutionStatus::Failed);
}

pub fn step_state<'a>(summary: &'a RunSummary, name: &str) -> &'a StepState {
    &summary
        .steps
        .iter()
        .find(|r| r.step == name)
        .unwrap_or_else(|| panic!("step {} not in plan", name))
        .state
}

pub fn assert_step_completed(summary: &RunSummary, name: &str) {
    assert!(
        matches!(step_state(summary, name), StepState::Completed { .. }),
        "step {} should be completed, got {:?}",
        name,
        step_state(summary, name)
    );
}

pub fn assert_step_pending(summary: &RunSummary, name: &str) {
    assert!(
        matches!(step_state(summary, name), StepState::Pending),
        "step {} should be pending, got {:?}",
        name,
        step_state(summary, name)
    );
}
