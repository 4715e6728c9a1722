//! Domain layer for workflow-relay
//!
//! This crate contains the core business logic of the plan-execution /
//! validation / clarification pipeline. It has no dependencies on
//! infrastructure or presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Plan
//!
//! An ordered sequence of [`ToolCall`]s produced by an external planner.
//! Before a call is validated its arguments pass through two pure repair
//! stages: synonym normalization and context fill.
//!
//! ## Clarification
//!
//! A validation failure with field-level detail does not fail the run;
//! it pauses it. The missing fields become [`MissingField`] records and
//! user-facing questions; the caller resumes later with patched context.

pub mod clarify;
pub mod plan;
pub mod run;
pub mod tool;

// Re-export commonly used types
pub use clarify::{MissingField, extract_missing_fields, questions_for_missing};
pub use plan::{ArgMap, Context, ToolCall, fill_from_context, normalize_args};
pub use run::{
    NEEDS_INPUT_MESSAGE, PLANNER_STEP_NAME, RunDraft, RunId, RunOutcome, RunRecord, RunStatus,
    RunSummary, Step, StoredRun,
};
pub use tool::{
    CallError, FieldKind, FieldSpec, TOOL_SCHEMAS, ToolSchema, ValidationDetail, known_tools,
    schema_for, validate_args,
};
