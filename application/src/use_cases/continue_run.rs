//! Continue Run use case.
//!
//! Resumes a paused run without re-planning: the stored plan is replayed
//! against a context formed by shallow-merging the stored context under
//! the caller's patch (patch wins on key collision). No synthetic planner
//! step is appended on resumption.
//!
//! # Re-entrancy caveat
//!
//! No resume cursor is persisted; the whole plan replays from the start
//! and is expected to re-reach the same or a further point once the
//! missing data is supplied. Idempotence of already-successful side
//! effects (e.g., task creation) is NOT guaranteed across a
//! pause/continue cycle.

use std::sync::Arc;

use relay_domain::{Context, RunDraft, RunId};
use thiserror::Error;
use tracing::info;

use crate::config::ExecutionParams;
use crate::ports::run_store::{RunStorePort, StoreError};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::execute_plan::execute_plan;
use crate::use_cases::run_workflow::RunReport;

/// Errors that can occur while continuing a run.
#[derive(Error, Debug)]
pub enum ContinueRunError {
    #[error("Run not found: {0}")]
    RunNotFound(RunId),

    #[error("No proposed plan stored for run {0}")]
    NoProposedPlan(RunId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input for [`ContinueRunUseCase`].
#[derive(Debug, Clone)]
pub struct ContinueRunInput {
    pub run_id: RunId,
    /// User-supplied values, merged over the stored context.
    pub context_patch: Context,
    pub execution: ExecutionParams,
}

impl ContinueRunInput {
    pub fn new(run_id: impl Into<RunId>) -> Self {
        Self {
            run_id: run_id.into(),
            context_patch: Context::new(),
            execution: ExecutionParams::default(),
        }
    }

    pub fn with_patch(mut self, patch: Context) -> Self {
        self.context_patch = patch;
        self
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }
}

/// Use case for resuming a paused run with patched context.
pub struct ContinueRunUseCase {
    tools: Arc<dyn ToolExecutorPort>,
    store: Arc<dyn RunStorePort>,
}

impl ContinueRunUseCase {
    pub fn new(tools: Arc<dyn ToolExecutorPort>, store: Arc<dyn RunStorePort>) -> Self {
        Self { tools, store }
    }

    pub async fn execute(&self, input: ContinueRunInput) -> Result<RunReport, ContinueRunError> {
        let stored = self
            .store
            .load_for_continuation(&input.run_id)
            .await?
            .ok_or_else(|| ContinueRunError::RunNotFound(input.run_id.clone()))?;

        let plan = stored
            .proposed_plan
            .ok_or_else(|| ContinueRunError::NoProposedPlan(input.run_id.clone()))?;

        // Shallow merge: stored context first, patch keys win.
        let mut context = stored.context.unwrap_or_default();
        for (key, value) in input.context_patch {
            context.insert(key, value);
        }

        info!(run_id = %input.run_id, calls = plan.len(), "resuming stored plan");
        let execution = execute_plan(
            self.tools.as_ref(),
            &plan,
            &context,
            input.execution.max_steps,
            None,
        )
        .await;

        let draft = RunDraft {
            run_id: input.run_id.clone(),
            user_goal: stored.user_goal,
            status: execution.outcome.status(),
            final_answer: execution.outcome.final_answer().to_string(),
            steps: execution.steps.clone(),
            proposed_plan: execution.outcome.proposed_plan().map(<[_]>::to_vec),
            context: Some(context),
        };
        self.store.save(&draft).await?;
        info!(run_id = %input.run_id, status = %draft.status, "continuation persisted");

        Ok(RunReport {
            run_id: input.run_id,
            outcome: execution.outcome,
            steps: execution.steps,
        })
    }
}
