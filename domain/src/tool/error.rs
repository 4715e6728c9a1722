//! Call error taxonomy.
//!
//! Every failure around a single tool call is one of three kinds, and the
//! kind decides what the executor does with it:
//!
//! | Kind | Executor behavior |
//! |------|-------------------|
//! | `unknown_tool` | skip the call, log an audit step |
//! | `validation_error` | pause the run when field-level details exist, otherwise skip |
//! | `tool_runtime_error` | record and continue with the next call |
//!
//! Serialized into step results as `{"error": {"type": ..., ...}}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One failing field inside a `validation_error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDetail {
    /// Path to the offending field (top-level fields have a single segment).
    pub loc: Vec<String>,
    /// Human-readable reason (e.g., "field required", "string too short").
    pub msg: String,
}

impl ValidationDetail {
    pub fn new(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            loc: vec![field.into()],
            msg: msg.into(),
        }
    }

    /// Last path segment, used as the field name in clarification flows.
    pub fn field(&self) -> &str {
        self.loc.last().map(String::as_str).unwrap_or("unknown")
    }
}

/// Error attached to a single tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(tag = "type")]
pub enum CallError {
    /// The planner asked for a tool that is not registered.
    #[serde(rename = "unknown_tool")]
    #[error("{message}")]
    UnknownTool { message: String },

    /// Arguments did not satisfy the tool's schema.
    #[serde(rename = "validation_error")]
    #[error("{message} ({tool})")]
    Validation {
        tool: String,
        message: String,
        details: Vec<ValidationDetail>,
    },

    /// The tool implementation failed while executing.
    #[serde(rename = "tool_runtime_error")]
    #[error("{message}")]
    Runtime { message: String },
}

impl CallError {
    pub fn unknown_tool(name: &str) -> Self {
        Self::UnknownTool {
            message: format!("Unknown tool: {name}"),
        }
    }

    pub fn validation(tool: impl Into<String>, details: Vec<ValidationDetail>) -> Self {
        Self::Validation {
            tool: tool.into(),
            message: "Tool arguments failed validation".to_string(),
            details,
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_wire_compatible_tags() {
        let err = CallError::unknown_tool("frobnicate");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"type": "unknown_tool", "message": "Unknown tool: frobnicate"})
        );

        let err = CallError::validation(
            "draft_email",
            vec![ValidationDetail::new("subject", "field required")],
        );
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["type"], "validation_error");
        assert_eq!(value["tool"], "draft_email");
        assert_eq!(value["details"][0]["loc"], json!(["subject"]));
        assert_eq!(value["details"][0]["msg"], "field required");

        let err = CallError::runtime("boom");
        assert_eq!(
            serde_json::to_value(&err).unwrap()["type"],
            "tool_runtime_error"
        );
    }

    #[test]
    fn detail_field_falls_back_to_unknown() {
        let detail = ValidationDetail {
            loc: vec![],
            msg: "invalid".to_string(),
        };
        assert_eq!(detail.field(), "unknown");
    }
}
