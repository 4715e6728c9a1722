//! Configuration file loading for workflow-relay
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed with `RELAY_`
//! 2. `--config <path>` specified file
//! 3. Project root: `./relay.toml` or `./.relay.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/workflow-relay/config.toml`
//! 5. Fallback: `~/.config/workflow-relay/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, ExecutionConfig, FileConfig, OllamaConfig, StorageConfig,
};
pub use loader::ConfigLoader;
