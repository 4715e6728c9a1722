//! Application-level configuration types.

pub mod execution_params;

pub use execution_params::{DEFAULT_MAX_STEPS, ExecutionParams};
