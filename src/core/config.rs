//! Build configuration from YAML
//!
//! Every field has a default matching the stock scaffold, so an empty file (or
//! no file at all) yields a working configuration. The configuration is loaded
//! once, overridden once from the command line, and then only read.

use crate::core::{registry::TaskRegistry, Environment};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::Path;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "burrito.yml";

/// Top-level build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Theme to compile assets for
    pub theme: String,

    /// Target environment
    pub env: Environment,

    /// Output directories
    pub paths: DistPaths,

    /// Sources concatenated into the theme's `app.js`
    pub scripts: Vec<String>,

    /// Scripts copied verbatim into `scripts_dist`
    pub global_scripts: Vec<String>,

    /// Styles copied verbatim into `styles_dist`
    pub global_styles: Vec<String>,

    /// Steps the `lint` task expands to
    pub lint: Vec<String>,

    /// Steps the `test` task expands to
    pub test: Vec<String>,

    /// File patterns for the watch targets
    pub watch: WatchPatterns,

    /// Notifications shown by `notify:<name>` steps
    pub notifications: BTreeMap<String, Notification>,

    /// Shell command per step name
    pub actions: BTreeMap<String, String>,

    /// Timeout for a single step action (in seconds)
    pub step_timeout_secs: u64,

    /// Page server settings
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DistPaths {
    pub scripts_dist: String,
    pub styles_dist: String,
    pub images_dist: String,
    pub theme_dist: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WatchPatterns {
    pub scss: Vec<String>,
    pub images: Vec<String>,
    pub templates: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

/// How the root page answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HomeMode {
    #[default]
    Text,
    Template,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub address: String,

    pub home: HomeMode,

    /// Body for the `text` home page
    pub home_text: String,

    /// View rendered for the `template` home page
    pub home_view: String,

    /// Directory holding `<view>.html` files
    pub views_dir: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            theme: "Burrito".to_string(),
            env: Environment::Development,
            paths: DistPaths::default(),
            scripts: vec![
                "assets/js/**/*.js".to_string(),
                "assets/themes/{{ theme }}/{{ theme }}.js".to_string(),
            ],
            global_scripts: vec!["assets/vendor/jQuery/dist/jquery.js".to_string()],
            global_styles: Vec::new(),
            lint: vec!["jshint".to_string()],
            test: Vec::new(),
            watch: WatchPatterns::default(),
            notifications: default_notifications(),
            actions: BTreeMap::new(),
            step_timeout_secs: 300,
            server: ServerConfig::default(),
        }
    }
}

impl Default for DistPaths {
    fn default() -> Self {
        Self {
            scripts_dist: "dist/scripts/".to_string(),
            styles_dist: "dist/styles/".to_string(),
            images_dist: "dist/images/".to_string(),
            theme_dist: "dist/{{ theme }}/".to_string(),
        }
    }
}

impl Default for WatchPatterns {
    fn default() -> Self {
        Self {
            scss: vec!["assets/scss/**/*.scss".to_string()],
            images: vec!["assets/images/**/*".to_string()],
            templates: vec!["templates/**/*".to_string()],
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
            home: HomeMode::Text,
            home_text: "hello".to_string(),
            home_view: "index".to_string(),
            views_dir: "templates".to_string(),
        }
    }
}

fn default_notifications() -> BTreeMap<String, Notification> {
    [
        ("scripts", "Scripts Compiled", "All scripts have been successfully compiled!"),
        ("css", "Styles Compiled", "All styles have been successfully compiled!"),
        ("templates", "Templates Compiled", "All templates have been successfully compiled!"),
        ("app", "App Built", "Your app has been successfully built!"),
    ]
    .into_iter()
    .map(|(name, title, message)| {
        (
            name.to_string(),
            Notification {
                title: title.to_string(),
                message: message.to_string(),
            },
        )
    })
    .collect()
}

impl BuildConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping
        let mut config: BuildConfig = if yaml.trim().is_empty() {
            BuildConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };

        // User notifications extend the stock set instead of replacing it
        for (name, notification) in default_notifications() {
            config.notifications.entry(name).or_insert(notification);
        }

        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for this process
    ///
    /// An explicit path must exist. Without one, `burrito.yml` in the working
    /// directory is used when present, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            tracing::debug!("Using {}", fallback.display());
            Self::from_file(fallback)
        } else {
            tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, env: Option<Environment>, theme: Option<String>) -> Result<Self> {
        if let Some(env) = env {
            self.env = env;
        }
        if let Some(theme) = theme {
            self.theme = theme;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.theme.trim().is_empty() {
            anyhow::bail!("Theme name cannot be empty");
        }
        if self.theme.contains('/') || self.theme.contains('\\') {
            anyhow::bail!("Theme name '{}' must not contain path separators", self.theme);
        }

        if self.step_timeout_secs == 0 {
            anyhow::bail!("step_timeout_secs must be greater than zero");
        }

        self.server
            .address
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid server address '{}'", self.server.address))?;

        if self.server.home == HomeMode::Template && self.server.home_view.trim().is_empty() {
            anyhow::bail!("Template home page requires a non-empty home_view");
        }

        for (step, command) in &self.actions {
            if command.trim().is_empty() {
                anyhow::bail!("Action for step '{}' is empty", step);
            }
        }

        // Composite tasks must expand without cycles
        TaskRegistry::new(self).check()?;

        Ok(())
    }

    pub fn notification(&self, name: &str) -> Option<&Notification> {
        self.notifications.get(name)
    }

    pub fn action(&self, step: &str) -> Option<&str> {
        self.actions.get(step).map(String::as_str)
    }
}
