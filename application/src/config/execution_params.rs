//! Execution parameters shared by the run use cases.

use serde::{Deserialize, Serialize};

/// Default bound on the number of tool calls executed per plan.
pub const DEFAULT_MAX_STEPS: usize = 8;

/// Tunable bounds for plan execution.
///
/// A plan longer than `max_steps` is truncated silently; the extra calls
/// are dropped without error and never appear in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionParams {
    pub max_steps: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl ExecutionParams {
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_max_steps() {
        assert_eq!(ExecutionParams::default().max_steps, DEFAULT_MAX_STEPS);
    }

    #[test]
    fn deserializes_from_empty_object() {
        let params: ExecutionParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, ExecutionParams::default());
    }
}
