//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every field has a default so a missing file or a partial file works.

use relay_application::{DEFAULT_MAX_STEPS, ExecutionParams};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("ollama.model cannot be empty")]
    EmptyModel,

    #[error("ollama.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("execution.max_steps cannot be 0")]
    ZeroMaxSteps,
}

/// Raw Ollama configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    pub base_url: String,
    /// Model used for planning
    pub model: String,
    /// Sampling temperature for the planner
    pub temperature: f32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.1:8b".to_string(),
            temperature: 0.2,
        }
    }
}

/// Raw storage configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the runs database. Defaults to the platform data dir.
    pub db_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the database path.
    ///
    /// Uses the configured path if set, otherwise
    /// `<data dir>/workflow-relay/runs.db`, falling back to `./runs.db`
    /// when no data dir can be determined.
    pub fn resolved_db_path(&self) -> PathBuf {
        if let Some(path) = &self.db_path {
            return path.clone();
        }
        dirs::data_dir()
            .map(|d| d.join("workflow-relay").join("runs.db"))
            .unwrap_or_else(|| PathBuf::from("runs.db"))
    }
}

/// Raw execution configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Hard cap on executed tool calls per run
    pub max_steps: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl ExecutionConfig {
    pub fn params(&self) -> ExecutionParams {
        ExecutionParams::default().with_max_steps(self.max_steps)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Planner backend settings
    pub ollama: OllamaConfig,
    /// Run store settings
    pub storage: StorageConfig,
    /// Executor settings
    pub execution: ExecutionConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.ollama.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModel);
        }
        if self.ollama.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if self.execution.max_steps == 0 {
            return Err(ConfigValidationError::ZeroMaxSteps);
        }
        Ok(())
    }
}
