//! Run entities: audit steps, outcomes, and persisted record shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clarify::MissingField;
use crate::plan::{Context, ToolCall};

/// Fixed user-facing message attached to a paused run.
pub const NEEDS_INPUT_MESSAGE: &str = "I’m missing a few details before I can continue.";

/// Name of the synthetic bookkeeping step recording the planner invocation.
pub const PLANNER_STEP_NAME: &str = "planner";

/// Unique identifier of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: Into<String>> From<T> for RunId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

/// One append-only audit-log entry.
///
/// `tool_result` is either a tool's successful output, an
/// `{"error": ...}` object, or `None` while the step is pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub thought: String,
    pub tool_call: Option<ToolCall>,
    pub tool_result: Option<Value>,
}

impl Step {
    pub fn new(thought: impl Into<String>, tool_call: Option<ToolCall>) -> Self {
        Self {
            thought: thought.into(),
            tool_call,
            tool_result: None,
        }
    }

    pub fn with_result(mut self, result: Value) -> Self {
        self.tool_result = Some(result);
        self
    }
}

/// Terminal status of an execution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Ok,
    NeedsInput,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Ok => "ok",
            RunStatus::NeedsInput => "needs_input",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ok" => Some(RunStatus::Ok),
            "needs_input" => Some(RunStatus::NeedsInput),
            _ => None,
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one execution pass over a plan.
///
/// `NeedsInput` is the single intentional pause: the run halted at the
/// first field-missing validation error and carries everything the caller
/// needs to ask the user and later resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Ok {
        final_answer: String,
    },
    NeedsInput {
        final_answer: String,
        missing_fields: Vec<MissingField>,
        questions: Vec<String>,
        /// The original, unexecuted plan, stored so continuation can
        /// replay it without re-planning.
        proposed_plan: Vec<ToolCall>,
    },
}

impl RunOutcome {
    pub fn status(&self) -> RunStatus {
        match self {
            RunOutcome::Ok { .. } => RunStatus::Ok,
            RunOutcome::NeedsInput { .. } => RunStatus::NeedsInput,
        }
    }

    pub fn final_answer(&self) -> &str {
        match self {
            RunOutcome::Ok { final_answer } | RunOutcome::NeedsInput { final_answer, .. } => {
                final_answer
            }
        }
    }

    pub fn proposed_plan(&self) -> Option<&[ToolCall]> {
        match self {
            RunOutcome::Ok { .. } => None,
            RunOutcome::NeedsInput { proposed_plan, .. } => Some(proposed_plan),
        }
    }
}

/// A run as handed to the store (the store assigns `created_at`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDraft {
    pub run_id: RunId,
    pub user_goal: String,
    pub status: RunStatus,
    pub final_answer: String,
    pub steps: Vec<Step>,
    pub proposed_plan: Option<Vec<ToolCall>>,
    pub context: Option<Context>,
}

/// A fully persisted run, as read back from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: RunId,
    pub created_at: i64,
    pub user_goal: String,
    pub status: RunStatus,
    pub final_answer: String,
    pub steps: Vec<Step>,
    pub proposed_plan: Option<Vec<ToolCall>>,
    pub context: Option<Context>,
}

/// Listing row for run history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub created_at: i64,
    pub user_goal: String,
    pub status: RunStatus,
    pub final_answer: String,
}

/// The slice of a stored run needed to continue it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRun {
    pub run_id: RunId,
    pub user_goal: String,
    pub status: RunStatus,
    pub proposed_plan: Option<Vec<ToolCall>>,
    pub context: Option<Context>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!(RunStatus::parse("ok"), Some(RunStatus::Ok));
        assert_eq!(RunStatus::parse("needs_input"), Some(RunStatus::NeedsInput));
        assert_eq!(RunStatus::parse("paused"), None);
        assert_eq!(RunStatus::NeedsInput.to_string(), "needs_input");
    }

    #[test]
    fn outcome_exposes_status_and_answer() {
        let outcome = RunOutcome::NeedsInput {
            final_answer: NEEDS_INPUT_MESSAGE.to_string(),
            missing_fields: vec![],
            questions: vec![],
            proposed_plan: vec![ToolCall::new("create_tasks")],
        };
        assert_eq!(outcome.status(), RunStatus::NeedsInput);
        assert_eq!(outcome.final_answer(), NEEDS_INPUT_MESSAGE);
        assert_eq!(outcome.proposed_plan().unwrap().len(), 1);
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = RunOutcome::Ok {
            final_answer: "Done.".to_string(),
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["final_answer"], "Done.");
    }
}
