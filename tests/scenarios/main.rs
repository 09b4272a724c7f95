//! Scenario-based tests for burrito task runs

#[path = "../helpers.rs"]
mod helpers;

mod command_actions;
mod compile_plans;
mod failure_handling;
