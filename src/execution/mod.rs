//! Plan execution

pub mod engine;
pub mod executor;

pub use engine::{EventHandler, PlanEngine, RunEvent};
pub use executor::{CommandRunner, StepError, StepOutcome, StepRunner};
