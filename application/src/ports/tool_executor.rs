//! Tool Executor port
//!
//! Defines the interface for invoking registered tools with already
//! sanitized arguments. Implementations (adapters) live in the
//! infrastructure layer.

use async_trait::async_trait;
use relay_domain::ArgMap;
use serde_json::Value;

/// Port for tool execution
///
/// A tool is a function from sanitized arguments to a JSON-representable
/// result. Failures come back as an error string which the executor
/// records as a `tool_runtime_error`; they never abort the run.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Whether a tool with this name is registered.
    fn has_tool(&self, name: &str) -> bool;

    /// Names of all registered tools, in registration order.
    fn tool_names(&self) -> Vec<&str>;

    /// Invoke a tool with sanitized arguments.
    async fn execute(&self, name: &str, args: &ArgMap) -> Result<Value, String>;
}
