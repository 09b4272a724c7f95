//! Target environment selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Build environment, chosen once per invocation
///
/// Serialized as its tag; deserialized through `FromStr`, so config files accept
/// the same case-insensitive aliases as the command line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(try_from = "String")]
pub enum Environment {
    /// Expanded styles, no minification
    #[default]
    #[serde(rename = "dev")]
    #[value(name = "dev", alias = "development")]
    Development,

    /// Compressed styles plus the minify/cleanup tail
    #[serde(rename = "prod")]
    #[value(name = "prod", alias = "production")]
    Production,
}

/// Output style handed to the style compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleOutput {
    Expanded,
    Compressed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseEnvironmentError {
    #[error("unknown environment '{0}' (expected one of: dev, development, prod, production)")]
    Unknown(String),
}

impl Environment {
    /// Short tag used in step targets (`sass:dev`, `sass:prod`)
    pub fn tag(self) -> &'static str {
        match self {
            Environment::Development => "dev",
            Environment::Production => "prod",
        }
    }

    pub fn style_output(self) -> StyleOutput {
        match self {
            Environment::Development => StyleOutput::Expanded,
            Environment::Production => StyleOutput::Compressed,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ParseEnvironmentError::Unknown(s.to_string())),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = ParseEnvironmentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for StyleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleOutput::Expanded => f.write_str("expanded"),
            StyleOutput::Compressed => f.write_str("compressed"),
        }
    }
}
