//! Configuration loading and validation for reagent.
//!
//! Loads run settings from a TOML file with environment variable
//! overrides. Every field has a sensible default, so a missing file is
//! not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `reagent.toml`:
///
/// ```toml
/// [run]
/// max_iterations = 10
/// reasoning_timeout_secs = 60
/// capability_timeout_secs = 30
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Control-loop settings
    #[serde(default)]
    pub run: RunConfig,
}

/// Bounds applied to every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Maximum think/act/observe cycles before a run is abandoned
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Per-call timeout for the reasoning port, in seconds
    #[serde(default = "default_reasoning_timeout")]
    pub reasoning_timeout_secs: u64,

    /// Per-call timeout for capability invocations, in seconds
    #[serde(default = "default_capability_timeout")]
    pub capability_timeout_secs: u64,
}

fn default_max_iterations() -> u32 {
    10
}
fn default_reasoning_timeout() -> u64 {
    60
}
fn default_capability_timeout() -> u64 {
    30
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            reasoning_timeout_secs: default_reasoning_timeout(),
            capability_timeout_secs: default_capability_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file path, then apply environment
    /// variable overrides:
    ///
    /// - `REAGENT_MAX_ITERATIONS`
    /// - `REAGENT_REASONING_TIMEOUT_SECS`
    /// - `REAGENT_CAPABILITY_TIMEOUT_SECS`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;

        if let Ok(max) = std::env::var("REAGENT_MAX_ITERATIONS") {
            config.run.max_iterations = max
                .parse()
                .map_err(|_| ConfigError::ValidationError("REAGENT_MAX_ITERATIONS must be a positive integer".into()))?;
        }
        if let Ok(secs) = std::env::var("REAGENT_REASONING_TIMEOUT_SECS") {
            config.run.reasoning_timeout_secs = secs
                .parse()
                .map_err(|_| ConfigError::ValidationError("REAGENT_REASONING_TIMEOUT_SECS must be an integer".into()))?;
        }
        if let Ok(secs) = std::env::var("REAGENT_CAPABILITY_TIMEOUT_SECS") {
            config.run.capability_timeout_secs = secs
                .parse()
                .map_err(|_| ConfigError::ValidationError("REAGENT_CAPABILITY_TIMEOUT_SECS must be an integer".into()))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path, falling back to
    /// defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.run.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "run.max_iterations must be at least 1".into(),
            ));
        }
        if self.run.reasoning_timeout_secs == 0 || self.run.capability_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeouts must be at least 1 second".into(),
            ));
        }
        Ok(())
    }

    /// Generate the default config as a TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}
