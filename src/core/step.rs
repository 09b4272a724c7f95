//! Build step model

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named unit of work for the external task runner
///
/// The name is opaque to the planner. `task` and `target` only split it on the
/// first `:` for registry lookups and display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildStep(String);

impl BuildStep {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Step for a task with a specific target, e.g. `copy:images`
    pub fn targeted(task: &str, target: &str) -> Self {
        Self(format!("{}:{}", task, target))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn task(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(task, _)| task)
    }

    pub fn target(&self) -> Option<&str> {
        self.0.split_once(':').map(|(_, target)| target)
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BuildStep {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for BuildStep {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for BuildStep {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BuildStep {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Render a plan as its step names
pub fn step_names(steps: &[BuildStep]) -> Vec<&str> {
    steps.iter().map(BuildStep::name).collect()
}
