//! Run subdomain: the audit log and the externally persisted aggregate.

pub mod entities;

pub use entities::{
    NEEDS_INPUT_MESSAGE, PLANNER_STEP_NAME, RunDraft, RunId, RunOutcome, RunRecord, RunStatus,
    RunSummary, Step, StoredRun,
};
