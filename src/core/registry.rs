//! Task registry - composite tasks and watch targets

use crate::core::{assemble, config::BuildConfig, BuildContext, BuildStep, Environment};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Task cycle detected: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}

/// Files to watch and the steps to run when they change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchTarget {
    pub name: String,
    pub patterns: Vec<String>,
    pub steps: Vec<BuildStep>,
}

/// Named composite tasks for one resolved configuration
#[derive(Debug, Clone)]
pub struct TaskRegistry {
    environment: Environment,
    composites: BTreeMap<String, Vec<BuildStep>>,
    watch_targets: Vec<WatchTarget>,
}

impl TaskRegistry {
    pub fn new(config: &BuildConfig) -> Self {
        let env = config.env;
        let mut composites = BTreeMap::new();

        composites.insert("compile".to_string(), assemble(env));
        composites.insert(
            "default".to_string(),
            vec![BuildStep::new("compile"), BuildStep::new("watch")],
        );
        composites.insert("lint".to_string(), to_steps(&config.lint));
        composites.insert("test".to_string(), to_steps(&config.test));

        let ctx = BuildContext::from_config(config);
        let watch_targets = vec![
            WatchTarget {
                name: "scss".to_string(),
                patterns: ctx.render_all(&config.watch.scss),
                steps: vec![
                    BuildStep::targeted("sass", env.tag()),
                    BuildStep::new("postcss"),
                    BuildStep::new("sassdoc"),
                    BuildStep::targeted("notify", "css"),
                ],
            },
            WatchTarget {
                name: "scripts".to_string(),
                patterns: ctx.render_all(&config.scripts),
                steps: vec![
                    BuildStep::new("concat"),
                    BuildStep::new("jshint"),
                    BuildStep::targeted("notify", "scripts"),
                ],
            },
            WatchTarget {
                name: "images".to_string(),
                patterns: ctx.render_all(&config.watch.images),
                steps: vec![
                    BuildStep::targeted("clean", "images"),
                    BuildStep::targeted("copy", "images"),
                ],
            },
            WatchTarget {
                name: "templates".to_string(),
                patterns: ctx.render_all(&config.watch.templates),
                steps: vec![BuildStep::targeted("notify", "templates")],
            },
        ];

        Self {
            environment: env,
            composites,
            watch_targets,
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn is_composite(&self, name: &str) -> bool {
        self.composites.contains_key(name)
    }

    /// Names of all composite tasks
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.composites.keys().map(String::as_str)
    }

    /// Direct steps of a task; a leaf resolves to itself
    pub fn resolve(&self, task: &str) -> Vec<BuildStep> {
        self.composites
            .get(task)
            .cloned()
            .unwrap_or_else(|| vec![BuildStep::new(task)])
    }

    /// Flatten composites recursively, preserving order
    pub fn expand(&self, steps: &[BuildStep]) -> Result<Vec<BuildStep>, RegistryError> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        for step in steps {
            self.expand_into(step, &mut path, &mut out)?;
        }
        Ok(out)
    }

    pub fn expand_task(&self, task: &str) -> Result<Vec<BuildStep>, RegistryError> {
        self.expand(&[BuildStep::new(task)])
    }

    fn expand_into(
        &self,
        step: &BuildStep,
        path: &mut Vec<String>,
        out: &mut Vec<BuildStep>,
    ) -> Result<(), RegistryError> {
        let Some(children) = self.composites.get(step.name()) else {
            out.push(step.clone());
            return Ok(());
        };

        if path.iter().any(|p| p == step.name()) {
            let mut cycle = path.clone();
            cycle.push(step.name().to_string());
            return Err(RegistryError::Cycle(cycle));
        }

        path.push(step.name().to_string());
        for child in children {
            self.expand_into(child, path, out)?;
        }
        path.pop();
        Ok(())
    }

    /// Verify that every composite expands
    pub fn check(&self) -> Result<(), RegistryError> {
        for name in self.composites.keys() {
            self.expand_task(name)?;
        }
        Ok(())
    }

    pub fn watch_targets(&self) -> &[WatchTarget] {
        &self.watch_targets
    }
}

fn to_steps(names: &[String]) -> Vec<BuildStep> {
    names.iter().map(|n| BuildStep::new(n.as_str())).collect()
}
