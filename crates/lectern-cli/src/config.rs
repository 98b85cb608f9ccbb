//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use lectern_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration: the pipeline sections plus front-end settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// `[llm]`, `[extraction]`, `[prompt]` and `[audit]` sections
    #[serde(flatten)]
    pub pipeline: PipelineConfig,

    /// `[cli]` section
    #[serde(default)]
    pub cli: Settings,
}

/// Front-end settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

impl Config {
    /// Directory holding the config file and REPL history.
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".lectern"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `~/.lectern/config.toml` is
    /// read if present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and validate a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.pipeline.validate()?;
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Apply command-line overrides and re-validate.
    pub fn apply_overrides(
        &mut self,
        model: Option<String>,
        endpoint: Option<String>,
    ) -> Result<()> {
        if let Some(model) = model {
            self.pipeline.llm.model = model;
        }
        if let Some(endpoint) = endpoint {
            self.pipeline.llm.endpoint = endpoint;
        }
        self.pipeline.validate()?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            history_size: 1000,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_history_size() -> usize {
    1000
}
