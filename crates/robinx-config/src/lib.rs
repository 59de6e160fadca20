//! Configuration for the robinx checker.
//!
//! Select which constraint categories to check and how the checks are
//! scheduled across threads, from TOML or YAML, without code changes.
//!
//! # Examples
//!
//! ```
//! use robinx_config::{CheckerConfig, ThreadCount};
//! use robinx_core::Category;
//!
//! let config = CheckerConfig::from_toml_str(r#"
//!     categories = ["CA1", "SE1"]
//!     thread_count = "none"
//! "#).unwrap();
//!
//! assert_eq!(config.categories(), vec![Category::Ca1, Category::Se1]);
//! assert_eq!(config.thread_count, ThreadCount::None);
//! assert!(config.structural_checks);
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use robinx_config::CheckerConfig;
//!
//! let config = CheckerConfig::load("robinx.toml").unwrap_or_default();
//! assert_eq!(config.categories().len(), 9);
//! ```

use std::path::Path;

use robinx_core::Category;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Checker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckerConfig {
    /// Categories to check; all of them when absent.
    #[serde(default)]
    pub categories: Option<Vec<Category>>,

    /// Threads used to run the category checks.
    #[serde(default)]
    pub thread_count: ThreadCount,

    /// Whether hard runs include the structural schedule checks.
    #[serde(default = "default_structural_checks")]
    pub structural_checks: bool,
}

fn default_structural_checks() -> bool {
    true
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            categories: None,
            thread_count: ThreadCount::default(),
            structural_checks: true,
        }
    }
}

impl CheckerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file.
    ///
    /// Files ending in `.yaml` or `.yml` are read as YAML, anything else as
    /// TOML.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Restricts checking to the given categories.
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = Some(categories.into_iter().collect());
        self
    }

    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.thread_count = thread_count;
        self
    }

    pub fn with_structural_checks(mut self, enabled: bool) -> Self {
        self.structural_checks = enabled;
        self
    }

    /// Categories to check, in category order and without duplicates.
    pub fn categories(&self) -> Vec<Category> {
        match &self.categories {
            Some(selected) => Category::ALL
                .into_iter()
                .filter(|c| selected.contains(c))
                .collect(),
            None => Category::ALL.to_vec(),
        }
    }

    /// Checks the configuration for values that cannot be run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a thread count of zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thread_count == ThreadCount::Count(0) {
            return Err(ConfigError::Invalid(
                "thread_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Use the global rayon pool.
    #[default]
    Auto,

    /// Run every check on the calling thread.
    None,

    /// Dedicated pool with this many threads.
    Count(usize),
}
