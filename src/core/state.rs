//! Execution state models

use crate::core::{BuildStep, Environment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Run has not started
    Pending,
    /// Run is in progress
    Running,
    /// Every step completed or was skipped
    Completed,
    /// A step failed and the run stopped
    Failed,
}

/// State of a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StepState {
    /// Not reached yet (or never reached after an earlier failure)
    Pending,
    /// Step is currently running
    Running {
        started_at: DateTime<Utc>,
    },
    /// Step action exited successfully
    Completed {
        output: String,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
    /// Step action failed
    Failed {
        error: String,
        started_at: DateTime<Utc>,
        failed_at: DateTime<Utc>,
    },
    /// Step had nothing to execute
    Skipped {
        reason: String,
    },
}

impl StepState {
    /// Check if step is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StepState::Completed { .. } | StepState::Failed { .. } | StepState::Skipped { .. }
        )
    }
}

/// A step of the run with its current state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: BuildStep,
    pub state: StepState,
}

/// Result of running a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique execution ID
    pub execution_id: Uuid,

    /// Task that produced the plan
    pub task: String,

    pub environment: Environment,

    pub status: ExecutionStatus,

    pub started_at: Option<DateTime<Utc>>,

    pub completed_at: Option<DateTime<Utc>>,

    /// Steps in plan order
    pub steps: Vec<StepRecord>,
}

impl RunSummary {
    pub fn new(task: impl Into<String>, environment: Environment, plan: &[BuildStep]) -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            task: task.into(),
            environment,
            status: ExecutionStatus::Pending,
            started_at: None,
            completed_at: None,
            steps: plan
                .iter()
                .map(|step| StepRecord {
                    step: step.clone(),
                    state: StepState::Pending,
                })
                .collect(),
        }
    }

    /// Mark run as started
    pub fn start(&mut self) {
        self.status = ExecutionStatus::Running;
        self.started_at = Some(Utc::now());
    }

    /// Mark run as completed
    pub fn complete(&mut self) {
        self.status = ExecutionStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    /// Mark run as failed
    pub fn fail(&mut self) {
        self.status = ExecutionStatus::Failed;
        self.completed_at = Some(Utc::now());
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn count(&self, pred: impl Fn(&StepState) -> bool) -> usize {
        self.steps.iter().filter(|r| pred(&r.state)).count()
    }

    pub fn completed_steps(&self) -> usize {
        self.count(|s| matches!(s, StepState::Completed { .. }))
    }

    pub fn skipped_steps(&self) -> usize {
        self.count(|s| matches!(s, StepState::Skipped { .. }))
    }

    /// First failed step, if any
    pub fn failed_step(&self) -> Option<&StepRecord> {
        self.steps
            .iter()
            .find(|r| matches!(r.state, StepState::Failed { .. }))
    }

    /// Calculate progress (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        self.count(StepState::is_terminal) as f64 / self.steps.len() as f64
    }
}
