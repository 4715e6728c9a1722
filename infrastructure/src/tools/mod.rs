//! Built-in tool registry: the concrete implementation of
//! [`ToolExecutorPort`].
//!
//! Tools are a closed, explicit table built at startup: each tool is a
//! [`BuiltinTool`] trait object registered in [`BuiltinToolExecutor::new`],
//! one implementation per schema in the domain layer. Execution receives
//! arguments already sanitized by domain validation; implementations still
//! read defensively because the port contract only promises JSON.
//!
//! A tool's `Err(String)` is surfaced to the executor as a
//! `tool_runtime_error`; it never aborts the run.

mod email;
mod reminder;
mod summarize;
mod tasks;

pub use email::DraftEmailTool;
pub use reminder::ScheduleReminderTool;
pub use summarize::SummarizeTextTool;
pub use tasks::CreateTasksTool;

use async_trait::async_trait;
use relay_application::ToolExecutorPort;
use relay_domain::ArgMap;
use serde_json::Value;
use tracing::debug;

/// One built-in tool: a named, synchronous function from sanitized
/// arguments to a JSON result.
pub trait BuiltinTool: Send + Sync {
    fn name(&self) -> &'static str;
    fn run(&self, args: &ArgMap) -> Result<Value, String>;
}

/// Executor backed by the built-in tool table.
pub struct BuiltinToolExecutor {
    tools: Vec<Box<dyn BuiltinTool>>,
}

impl BuiltinToolExecutor {
    /// Build the full tool table, in registration order.
    pub fn new() -> Self {
        Self {
            tools: vec![
                Box::new(SummarizeTextTool),
                Box::new(DraftEmailTool),
                Box::new(CreateTasksTool),
                Box::new(ScheduleReminderTool),
            ],
        }
    }

    fn get(&self, name: &str) -> Option<&dyn BuiltinTool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(Box::as_ref)
    }
}

impl Default for BuiltinToolExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutorPort for BuiltinToolExecutor {
    fn has_tool(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    async fn execute(&self, name: &str, args: &ArgMap) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Unknown tool: {name}"))?;
        debug!(tool = name, "executing built-in tool");
        tool.run(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registry_matches_domain_schemas() {
        let executor = BuiltinToolExecutor::new();
        let names = executor.tool_names();
        let known: Vec<&str> = relay_domain::known_tools().collect();
        assert_eq!(names, known);
    }

    #[tokio::test]
    async fn executes_registered_tool() {
        let executor = BuiltinToolExecutor::new();
        let args = json!({"text": "hello"}).as_object().cloned().unwrap();
        let out = executor.execute("summarize_text", &args).await.unwrap();
        assert_eq!(out["summary"], "hello");
    }

    #[tokio::test]
    async fn rejects_unregistered_tool() {
        let executor = BuiltinToolExecutor::new();
        let err = executor
            .execute("frobnicate", &ArgMap::new())
            .await
            .unwrap_err();
        assert_eq!(err, "Unknown tool: frobnicate");
    }
}
