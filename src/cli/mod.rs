//! Command-line interface

pub mod commands;
pub mod output;

use crate::core::Environment;
use clap::{Parser, Subcommand};
use commands::{PlanCommand, RunCommand, ServeCommand, ValidateCommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Front-end build scaffold
#[derive(Debug, Parser, Clone)]
#[command(name = "burrito")]
#[command(author = "Burrito Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Environment-aware build plans and a tiny page server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file (defaults to ./burrito.yml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Target environment
    #[arg(short, long, global = true, value_enum, ignore_case = true)]
    pub env: Option<Environment>,

    /// Theme to compile assets for
    #[arg(short, long, global = true)]
    pub theme: Option<String>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the build plan for a task
    Plan(PlanCommand),

    /// Run a task's steps through their configured actions
    Run(RunCommand),

    /// Serve the page
    Serve(ServeCommand),

    /// Validate the configuration
    Validate(ValidateCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
