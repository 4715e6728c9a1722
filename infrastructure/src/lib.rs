//! Infrastructure layer for workflow-relay
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the built-in tool registry, the Ollama planner, the
//! SQLite run store, and configuration file loading.

pub mod config;
pub mod planner;
pub mod storage;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig, OllamaConfig, StorageConfig};
pub use planner::OllamaPlanner;
pub use storage::SqliteRunStore;
pub use tools::BuiltinToolExecutor;
