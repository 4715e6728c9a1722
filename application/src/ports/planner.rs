//! Planner port
//!
//! Defines the interface to the external language-model planner that turns
//! a natural-language goal into a candidate plan. The planner is a black
//! box to the core: it may retry or repair its own output internally; all
//! the core requires is a bounded sequence of `{name, args}` records plus
//! the raw model text for the audit log.

use async_trait::async_trait;
use relay_domain::{Context, ToolCall};
use thiserror::Error;

/// Errors that can occur while planning.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Planner unavailable: {0}")]
    Unavailable(String),

    #[error("Planner produced unusable output: {0}")]
    InvalidOutput(String),
}

/// A candidate plan plus planner debug output.
#[derive(Debug, Clone)]
pub struct PlannedWorkflow {
    /// Ordered tool calls to execute.
    pub plan: Vec<ToolCall>,
    /// Raw model output, recorded in the synthetic planner audit step.
    pub raw_output: String,
}

/// Port for plan generation
///
/// This port defines how the application layer obtains a plan.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait PlannerPort: Send + Sync {
    /// Produce a plan for `goal`, optionally informed by caller context.
    async fn plan(
        &self,
        goal: &str,
        context: Option<&Context>,
    ) -> Result<PlannedWorkflow, PlannerError>;
}
