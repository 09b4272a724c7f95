//! View rendering for the template home page
//!
//! The templating engine is external; a view is served as the file contents.

use super::dispatch::HomePage;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Invalid view name '{0}'")]
    InvalidName(String),

    #[error("Failed to read view '{view}' from {path}: {message}")]
    Read {
        view: String,
        path: String,
        message: String,
    },
}

/// Trait for view rendering - allows for different implementations
#[async_trait]
pub trait ViewRenderer: Send + Sync {
    async fn render(&self, view: &str) -> Result<String, ViewError>;
}

/// Reads `<dir>/<view>.html`
#[derive(Debug, Clone)]
pub struct FileViewRenderer {
    dir: PathBuf,
}

impl FileViewRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, view: &str) -> Result<PathBuf, ViewError> {
        let valid = !view.is_empty()
            && view
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
        if !valid {
            return Err(ViewError::InvalidName(view.to_string()));
        }
        Ok(self.dir.join(format!("{}.html", view)))
    }

    /// Reject a template home page whose view name can never be served
    pub fn check_home(&self, home: &HomePage) -> Result<(), ViewError> {
        if let HomePage::Template(view) = home {
            self.path_for(view)?;
        }
        Ok(())
    }
}

#[async_trait]
impl ViewRenderer for FileViewRenderer {
    async fn render(&self, view: &str) -> Result<String, ViewError> {
        let path = self.path_for(view)?;
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ViewError::Read {
                view: view.to_string(),
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }
}
