//! CLI output formatting

use crate::{
    core::{registry::WatchTarget, BuildStep, ExecutionStatus, RunSummary, StepState},
    execution::RunEvent,
};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");
pub static BELL: Emoji<'_, '_> = Emoji("🔔 ", "* ");

/// Create a progress bar
pub fn create_progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    progress.set_style(style);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// Format a step state for display
pub fn format_step_state(state: &StepState) -> String {
    match state {
        StepState::Pending => style("PENDING").dim().to_string(),
        StepState::Running { .. } => style("RUNNING").yellow().to_string(),
        StepState::Completed { .. } => style("COMPLETED").green().to_string(),
        StepState::Failed { .. } => style("FAILED").red().to_string(),
        StepState::Skipped { .. } => style("SKIPPED").dim().to_string(),
    }
}

/// Format an execution status for display
pub fn format_status(status: ExecutionStatus) -> String {
    match status {
        ExecutionStatus::Pending => style("PENDING").dim().to_string(),
        ExecutionStatus::Running => style("RUNNING").yellow().to_string(),
        ExecutionStatus::Completed => style("COMPLETED").green().to_string(),
        ExecutionStatus::Failed => style("FAILED").red().to_string(),
    }
}

/// Numbered list of plan steps
pub fn format_plan(steps: &[BuildStep]) -> String {
    if steps.is_empty() {
        return format!("  {}", style("(no steps)").dim());
    }
    let width = steps.len().to_string().len();
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            format!(
                "  {:>width$}. {}",
                style(i + 1).dim(),
                style(step).cyan(),
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_watch_target(target: &WatchTarget) -> String {
    let steps: Vec<String> = target.steps.iter().map(|s| s.to_string()).collect();
    format!(
        "  {}\n    files: {}\n    tasks: {}",
        style(&target.name).bold(),
        style(target.patterns.join(", ")).dim(),
        style(steps.join(" → ")).cyan()
    )
}

/// Format run summary for display
pub fn format_run_summary(summary: &RunSummary) -> String {
    let status_icon = match summary.status {
        ExecutionStatus::Completed => CHECK,
        ExecutionStatus::Failed => CROSS,
        ExecutionStatus::Running => SPINNER,
        ExecutionStatus::Pending => INFO,
    };

    format!(
        "{} {} - {} ({}) - {} - {} completed, {} skipped of {} - {}",
        status_icon,
        style(&summary.execution_id.to_string()[..8]).dim(),
        style(&summary.task).bold(),
        summary.environment,
        format_status(summary.status),
        summary.completed_steps(),
        summary.skipped_steps(),
        summary.total_steps(),
        style(format!("{:.0}%", summary.progress() * 100.0)).cyan()
    )
}

/// Format a run event for display
pub fn format_run_event(event: &RunEvent) -> String {
    match event {
        RunEvent::RunStarted {
            execution_id,
            task,
            total_steps,
        } => format!(
            "{} Running {} ({} steps, {})",
            ROCKET,
            style(task).bold(),
            total_steps,
            style(&execution_id.to_string()[..8]).dim()
        ),
        RunEvent::StepStarted { step, .. } => format!("{} {}", SPINNER, style(step).cyan()),
        RunEvent::StepCompleted { step, .. } => format!("{} {}", CHECK, style(step).green()),
        RunEvent::StepSkipped { step, reason } => format!(
            "{} {} ({})",
            INFO,
            style(step).dim(),
            style(reason).dim()
        ),
        RunEvent::Notification {
            title, message, ..
        } => format!("{} {}: {}", BELL, style(title).bold(), message),
        RunEvent::StepFailed { step, error } => {
            format!("{} {}: {}", CROSS, style(step).red(), style(error).dim())
        }
        RunEvent::RunCompleted {
            execution_id,
            status,
        } => {
            let status_str = match status {
                ExecutionStatus::Completed => format!("{} completed", style("successfully").green()),
                ExecutionStatus::Failed => style("failed").red().to_string(),
                _ => format!("{:?}", status),
            };
            format!(
                "{} Run ({}) {}",
                INFO,
                style(&execution_id.to_string()[..8]).dim(),
                status_str
            )
        }
    }
}

/// Format step output with truncation
pub fn format_output(output: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();

    if lines.len() <= max_lines {
        output.to_string()
    } else {
        let truncated = lines[..max_lines].join("\n");
        format!(
            "{}\n{}... ({} more lines)",
            truncated,
            style("[truncated]").dim(),
            lines.len() - max_lines
        )
    }
}
