//! CLI command definitions

use crate::core::config::HomeMode;
use clap::Args;

/// Print the build plan for a task
#[derive(Debug, Args, Clone)]
pub struct PlanCommand {
    /// Task to plan (compile, default, lint, test, watch, or a single step)
    #[arg(long, default_value = "compile")]
    pub task: String,

    /// Flatten composite tasks into leaf steps
    #[arg(long)]
    pub expand: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Run a task
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Task to run
    #[arg(long, default_value = "compile")]
    pub task: String,

    /// Report the steps without running any action
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the output of each step's command
    #[arg(short, long)]
    pub show_output: bool,
}

/// Serve the page
#[derive(Debug, Args, Clone)]
pub struct ServeCommand {
    /// Listen address (overrides server.address)
    #[arg(short, long)]
    pub address: Option<String>,

    /// Home page mode (overrides server.home)
    #[arg(long, value_enum)]
    pub home: Option<HomeMode>,

    /// View rendered for the template home page (overrides server.home_view)
    #[arg(long)]
    pub view: Option<String>,
}

/// Validate the configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
