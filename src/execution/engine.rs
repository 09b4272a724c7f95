//! Plan engine - runs a flattened plan one step at a time

use crate::{
    core::{BuildStep, Environment, ExecutionStatus, RunSummary, StepState},
    execution::{StepOutcome, StepRunner},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Events that can occur during a run
#[derive(Debug, Clone)]
pub enum RunEvent {
    RunStarted {
        execution_id: Uuid,
        task: String,
        total_steps: usize,
    },
    StepStarted {
        step: BuildStep,
        index: usize,
    },
    StepCompleted {
        step: BuildStep,
        output: String,
    },
    StepSkipped {
        step: BuildStep,
        reason: String,
    },
    Notification {
        step: BuildStep,
        title: String,
        message: String,
    },
    StepFailed {
        step: BuildStep,
        error: String,
    },
    RunCompleted {
        execution_id: Uuid,
        status: ExecutionStatus,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(RunEvent) + Send + Sync>;

/// Sequential plan executor; stops at the first failing step
pub struct PlanEngine<R> {
    runner: R,
    event_handlers: Vec<EventHandler>,
    dry_run: bool,
}

impl<R: StepRunner> PlanEngine<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            event_handlers: Vec::new(),
            dry_run: false,
        }
    }

    /// Record every step as skipped without invoking the runner
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(RunEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    fn emit_event(&self, event: RunEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// Execute a plan in order
    pub async fn execute(&self, task: &str, environment: Environment, plan: &[BuildStep]) -> RunSummary {
        let mut summary = RunSummary::new(task, environment, plan);
        let execution_id = summary.execution_id;

        info!("Starting {} ({}, {} steps, {})", task, environment, plan.len(), execution_id);
        summary.start();
        self.emit_event(RunEvent::RunStarted {
            execution_id,
            task: task.to_string(),
            total_steps: plan.len(),
        });

        for (index, step) in plan.iter().enumerate() {
            self.emit_event(RunEvent::StepStarted {
                step: step.clone(),
                index,
            });

            if self.dry_run {
                let reason = "dry run".to_string();
                summary.steps[index].state = StepState::Skipped {
                    reason: reason.clone(),
                };
                self.emit_event(RunEvent::StepSkipped {
                    step: step.clone(),
                    reason,
                });
                continue;
            }

            let started_at = Utc::now();
            summary.steps[index].state = StepState::Running { started_at };

            match self.runner.run(step).await {
                Ok(StepOutcome::Completed { output }) => {
                    summary.steps[index].state = StepState::Completed {
                        output: output.clone(),
                        started_at,
                        completed_at: Utc::now(),
                    };
                    self.emit_event(RunEvent::StepCompleted {
                        step: step.clone(),
                        output,
                    });
                }
                Ok(StepOutcome::Notified(notification)) => {
                    summary.steps[index].state = StepState::Completed {
                        output: format!("{}: {}", notification.title, notification.message),
                        started_at,
                        completed_at: Utc::now(),
                    };
                    self.emit_event(RunEvent::Notification {
                        step: step.clone(),
                        title: notification.title,
                        message: notification.message,
                    });
                }
                Ok(StepOutcome::Skipped { reason }) => {
                    summary.steps[index].state = StepState::Skipped {
                        reason: reason.clone(),
                    };
                    self.emit_event(RunEvent::StepSkipped {
                        step: step.clone(),
                        reason,
                    });
                }
                Err(e) => {
                    error!("Step {} failed: {}", step, e);
                    summary.steps[index].state = StepState::Failed {
                        error: e.to_string(),
                        started_at,
                        failed_at: Utc::now(),
                    };
                    self.emit_event(RunEvent::StepFailed {
                        step: step.clone(),
                        error: e.to_string(),
                    });
                    summary.fail();
                    break;
                }
            }
        }

        if summary.status == ExecutionStatus::Running {
            summary.complete();
        }

        info!("Run {} finished: {:?}", execution_id, summary.status);
        self.emit_event(RunEvent::RunCompleted {
            execution_id,
            status: summary.status,
        });

        summary
    }
}
