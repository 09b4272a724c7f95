//! Core domain models
//!
//! Environments, build steps, plan assembly, configuration and the task
//! registry. Nothing in here performs I/O except loading the config file.

pub mod assembler;
pub mod config;
pub mod context;
pub mod environment;
pub mod registry;
pub mod state;
pub mod step;

pub use assembler::*;
pub use context::*;
pub use environment::*;
pub use state::*;
pub use step::*;
