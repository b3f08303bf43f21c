//! Configuration file handling for PyPiler.

use anyhow::{Context, Result};
use pypiler_core::LoweringOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up by [`Config::find`].
pub const CONFIG_FILE: &str = "pypiler.toml";

/// Represents the pypiler.toml configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lowering: LoweringOptions,
    #[serde(default)]
    pub output: OutputOptions,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How lowered graphs are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Line-oriented dump of operations and carriers.
    #[default]
    Text,
    Json,
}

impl Config {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a pypiler.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;

        toml::from_str(&contents).with_context(|| format!("Failed to parse {CONFIG_FILE}"))
    }

    /// Saves configuration to a pypiler.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize configuration")?;

        fs::write(path.as_ref(), contents)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))
    }

    /// Finds pypiler.toml starting from `start` and walking up.
    ///
    /// # Errors
    /// Returns an error if no pypiler.toml is found in `start` or any of its
    /// parents, or if the one found cannot be loaded.
    pub fn find_from(start: impl Into<PathBuf>) -> Result<(Self, PathBuf)> {
        let mut current_dir = start.into();

        loop {
            let config_path = current_dir.join(CONFIG_FILE);
            if config_path.exists() {
                let config = Self::load(&config_path)?;
                return Ok((config, current_dir));
            }

            if !current_dir.pop() {
                anyhow::bail!(
                    "Could not find {CONFIG_FILE} in current directory or any parent directory"
                );
            }
        }
    }

    /// Finds pypiler.toml starting from the current directory.
    ///
    /// # Errors
    /// Returns an error if no pypiler.toml is found in the current or parent directories.
    pub fn find() -> Result<(Self, PathBuf)> {
        let current_dir =
            std::env::current_dir().with_context(|| "Failed to get current directory")?;
        Self::find_from(current_dir)
    }
}
