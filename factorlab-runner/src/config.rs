//! Serializable run configuration (TOML).
//!
//! Defaults live here, at the orchestration boundary; the core never falls
//! back to implicit globals.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors, surfaced before any run starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("initial capital must be positive, got {0}")]
    NonPositiveCapital(f64),
}

/// Top-level run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub backtest: BacktestSection,
    #[serde(default)]
    pub output: OutputSection,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            backtest: BacktestSection::default(),
            output: OutputSection::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestSection {
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
}

impl Default for BacktestSection {
    fn default() -> Self {
        Self {
            initial_capital: default_initial_capital(),
        }
    }
}

fn default_initial_capital() -> f64 {
    100_000.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results/backtest")
}

impl RunConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RunConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backtest.initial_capital <= 0.0 {
            return Err(ConfigError::NonPositiveCapital(
                self.backtest.initial_capital,
            ));
        }
        Ok(())
    }
}
