//! Plan entities: the tool-call sequence produced by the planner.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Argument mapping for a tool call (JSON object).
pub type ArgMap = serde_json::Map<String, Value>;

/// Caller-supplied side data used to fill gaps in tool arguments.
///
/// Has no schema of its own; consumers read specific known keys
/// defensively and ignore everything else.
pub type Context = serde_json::Map<String, Value>;

/// A single entry in a plan: a named request to invoke a registered tool.
///
/// Produced by the planner or replayed from storage. The pipeline stages
/// (normalize, context fill, validate) each return a new argument map;
/// the original call is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name (e.g., "draft_email").
    pub name: String,
    /// Raw arguments. Kept as a loose [`Value`] because planners sometimes
    /// emit non-object args; normalization maps those to an empty object.
    #[serde(default)]
    pub args: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Value::Object(ArgMap::new()),
        }
    }

    /// Replace the full argument map.
    pub fn with_args(mut self, args: ArgMap) -> Self {
        self.args = Value::Object(args);
        self
    }

    /// Add a single argument (builder style, mostly for tests).
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if !self.args.is_object() {
            self.args = Value::Object(ArgMap::new());
        }
        if let Some(map) = self.args.as_object_mut() {
            map.insert(key.into(), value.into());
        }
        self
    }

    /// The arguments as an object, or `None` when the planner emitted
    /// something other than a JSON object.
    pub fn arg_map(&self) -> Option<&ArgMap> {
        self.args.as_object()
    }
}
