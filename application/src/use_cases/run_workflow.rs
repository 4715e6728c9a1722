//! Run Workflow use case.
//!
//! Starts a fresh run: asks the [`PlannerPort`] for a candidate plan,
//! executes it through the plan-executor state machine, and persists the
//! resulting record. A paused run (status `needs_input`) stores its
//! proposed plan and context so [`ContinueRunUseCase`](super::continue_run::ContinueRunUseCase)
//! can resume it later.

use std::sync::Arc;

use relay_domain::{Context, RunDraft, RunId, RunOutcome, Step};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ExecutionParams;
use crate::ports::planner::{PlannerError, PlannerPort};
use crate::ports::run_store::{RunStorePort, StoreError};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::execute_plan::{execute_plan, planner_step};

/// Errors that can occur while starting a run.
#[derive(Error, Debug)]
pub enum RunWorkflowError {
    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input for [`RunWorkflowUseCase`].
#[derive(Debug, Clone)]
pub struct RunWorkflowInput {
    /// The user's natural-language goal.
    pub user_goal: String,
    /// Optional side data for context fill.
    pub context: Option<Context>,
    /// Execution bounds.
    pub execution: ExecutionParams,
}

impl RunWorkflowInput {
    pub fn new(user_goal: impl Into<String>) -> Self {
        Self {
            user_goal: user_goal.into(),
            context: None,
            execution: ExecutionParams::default(),
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }
}

/// What an execution pass hands back to the caller.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: RunId,
    pub outcome: RunOutcome,
    pub steps: Vec<Step>,
}

/// Use case for running a workflow from a natural-language goal.
pub struct RunWorkflowUseCase {
    planner: Arc<dyn PlannerPort>,
    tools: Arc<dyn ToolExecutorPort>,
    store: Arc<dyn RunStorePort>,
}

impl RunWorkflowUseCase {
    pub fn new(
        planner: Arc<dyn PlannerPort>,
        tools: Arc<dyn ToolExecutorPort>,
        store: Arc<dyn RunStorePort>,
    ) -> Self {
        Self {
            planner,
            tools,
            store,
        }
    }

    pub async fn execute(&self, input: RunWorkflowInput) -> Result<RunReport, RunWorkflowError> {
        let run_id = RunId::new(uuid::Uuid::new_v4().to_string());
        info!(%run_id, goal = %input.user_goal, "starting workflow run");

        let planned = self
            .planner
            .plan(&input.user_goal, input.context.as_ref())
            .await?;
        debug!(calls = planned.plan.len(), "planner returned a plan");

        let context = input.context.clone().unwrap_or_default();
        let lead = planner_step(&input.user_goal, &planned.plan, &planned.raw_output);
        let execution = execute_plan(
            self.tools.as_ref(),
            &planned.plan,
            &context,
            input.execution.max_steps,
            Some(lead),
        )
        .await;

        let draft = RunDraft {
            run_id: run_id.clone(),
            user_goal: input.user_goal,
            status: execution.outcome.status(),
            final_answer: execution.outcome.final_answer().to_string(),
            steps: execution.steps.clone(),
            proposed_plan: execution.outcome.proposed_plan().map(<[_]>::to_vec),
            context: input.context,
        };
        self.store.save(&draft).await?;
        info!(%run_id, status = %draft.status, "run persisted");

        Ok(RunReport {
            run_id,
            outcome: execution.outcome,
            steps: execution.steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::planner::PlannedWorkflow;
    use async_trait::async_trait;
    use relay_domain::{
        ArgMap, RunRecord, RunStatus, RunSummary, StoredRun, ToolCall, known_tools,
    };
    use serde_json::{Value, json};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct MockPlanner {
        plan: Vec<ToolCall>,
    }

    #[async_trait]
    impl PlannerPort for MockPlanner {
        async fn plan(
            &self,
            _goal: &str,
            _context: Option<&Context>,
        ) -> Result<PlannedWorkflow, PlannerError> {
            Ok(PlannedWorkflow {
                plan: self.plan.clone(),
                raw_output: "[]".to_string(),
            })
        }
    }

    struct MockTools;

    #[async_trait]
    impl ToolExecutorPort for MockTools {
        fn has_tool(&self, name: &str) -> bool {
            known_tools().any(|t| t == name)
        }

        fn tool_names(&self) -> Vec<&str> {
            known_tools().collect()
        }

        async fn execute(&self, name: &str, _args: &ArgMap) -> Result<Value, String> {
            Ok(json!({"tool": name}))
        }
    }

    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub saved: Mutex<Vec<RunDraft>>,
    }

    #[async_trait]
    impl RunStorePort for MemoryStore {
        async fn save(&self, draft: &RunDraft) -> Result<(), StoreError> {
            self.saved.lock().unwrap().push(draft.clone());
            Ok(())
        }

        async fn load_for_continuation(
            &self,
            run_id: &RunId,
        ) -> Result<Option<StoredRun>, StoreError> {
            Ok(self
                .saved
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|d| &d.run_id == run_id)
                .map(|d| StoredRun {
                    run_id: d.run_id.clone(),
                    user_goal: d.user_goal.clone(),
                    status: d.status,
                    proposed_plan: d.proposed_plan.clone(),
                    context: d.context.clone(),
                }))
        }

        async fn list(&self, _limit: usize) -> Result<Vec<RunSummary>, StoreError> {
            Ok(Vec::new())
        }

        async fn read(&self, _run_id: &RunId) -> Result<Option<RunRecord>, StoreError> {
            Ok(None)
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn fresh_run_persists_ok_record_with_planner_step() {
        let store = Arc::new(MemoryStore::default());
        let use_case = RunWorkflowUseCase::new(
            Arc::new(MockPlanner {
                plan: vec![ToolCall::new("create_tasks").with_arg("tasks", json!(["a"]))],
            }),
            Arc::new(MockTools),
            store.clone(),
        );

        let report = use_case
            .execute(RunWorkflowInput::new("make some tasks"))
            .await
            .unwrap();

        assert_eq!(report.outcome.status(), RunStatus::Ok);
        assert_eq!(report.steps[0].thought, "Planner produced tool calls.");

        let saved = store.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].run_id, report.run_id);
        assert_eq!(saved[0].status, RunStatus::Ok);
        assert!(saved[0].proposed_plan.is_none());
    }

    #[tokio::test]
    async fn paused_run_stores_plan_and_context_for_continuation() {
        let store = Arc::new(MemoryStore::default());
        let plan = vec![ToolCall::new("draft_email").with_arg("to", "a@b.com")];
        let use_case = RunWorkflowUseCase::new(
            Arc::new(MockPlanner { plan: plan.clone() }),
            Arc::new(MockTools),
            store.clone(),
        );

        let context = json!({"subject_hint": "weekly"}).as_object().cloned().unwrap();
        let report = use_case
            .execute(RunWorkflowInput::new("email the team").with_context(context.clone()))
            .await
            .unwrap();

        assert_eq!(report.outcome.status(), RunStatus::NeedsInput);

        let saved = store.saved.lock().unwrap();
        assert_eq!(saved[0].status, RunStatus::NeedsInput);
        assert_eq!(saved[0].proposed_plan.as_ref().unwrap(), &plan);
        assert_eq!(saved[0].context.as_ref().unwrap(), &context);
    }
}
