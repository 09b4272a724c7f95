//! Step runners - hand a single build step to external tooling

use crate::core::{config::{BuildConfig, Notification}, BuildContext, BuildStep};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Error types for step execution
#[derive(Debug, Error)]
pub enum StepError {
    #[error("Failed to spawn '{command}': {message}")]
    Spawn { command: String, message: String },

    #[error("Exited with code {code}: {stderr}")]
    Exit { code: i32, stderr: String },

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}

/// What happened when a step was handed off
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The action ran and exited successfully
    Completed { output: String },
    /// A `notify:<name>` step resolved to its notification
    Notified(Notification),
    /// Nothing is registered for this step
    Skipped { reason: String },
}

/// Trait for step execution - allows for different implementations
#[async_trait]
pub trait StepRunner: Send + Sync {
    async fn run(&self, step: &BuildStep) -> Result<StepOutcome, StepError>;
}

/// Runs the shell command configured for each step
#[derive(Debug, Clone)]
pub struct CommandRunner {
    config: Arc<BuildConfig>,
    context: BuildContext,
    shell: String,
}

impl CommandRunner {
    pub fn new(config: Arc<BuildConfig>) -> Self {
        let context = BuildContext::from_config(&config);
        Self {
            config,
            context,
            shell: "sh".to_string(),
        }
    }

    /// Use a different shell executable (invoked as `<shell> -c <command>`)
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// The command a step would run, after variable substitution
    pub fn command_for(&self, step: &BuildStep) -> Option<String> {
        self.config
            .action(step.name())
            .map(|action| self.context.render(action))
    }

    fn unhandled(&self, step: &BuildStep) -> StepOutcome {
        if step.task() == "notify" {
            if let Some(notification) = step.target().and_then(|t| self.config.notification(t)) {
                return StepOutcome::Notified(notification.clone());
            }
        }
        StepOutcome::Skipped {
            reason: "no action configured".to_string(),
        }
    }
}

#[async_trait]
impl StepRunner for CommandRunner {
    async fn run(&self, step: &BuildStep) -> Result<StepOutcome, StepError> {
        let Some(command) = self.command_for(step) else {
            debug!("No action for step {}", step);
            return Ok(self.unhandled(step));
        };

        debug!("Running step {}: {}", step, command);

        let timeout_secs = self.config.step_timeout_secs;
        let result = timeout(
            Duration::from_secs(timeout_secs),
            Command::new(&self.shell)
                .arg("-c")
                .arg(&command)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| StepError::Timeout(timeout_secs))?;

        let output = result.map_err(|e| StepError::Spawn {
            command: command.clone(),
            message: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            warn!("Step {} exited with code {}: {}", step, code, stderr);
            return Err(StepError::Exit { code, stderr });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        debug!("Step {} produced {} bytes of output", step, stdout.len());

        Ok(StepOutcome::Completed { output: stdout })
    }
}
