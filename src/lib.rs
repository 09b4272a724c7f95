//! burrito - front-end build scaffold: environment-aware build plans and a tiny page server

pub mod cli;
pub mod core;
pub mod execution;
pub mod server;

// Re-export commonly used types
pub use crate::core::{assemble, BuildStep, Environment, ExecutionStatus, RunSummary, StepState};
pub use crate::core::config::BuildConfig;
pub use crate::core::registry::TaskRegistry;
pub use execution::{CommandRunner, PlanEngine, RunEvent, StepRunner};
pub use server::{Dispatcher, HomePage, HttpServer};
