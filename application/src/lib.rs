//! Application layer for workflow-relay
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_MAX_STEPS, ExecutionParams};
pub use ports::{
    planner::{PlannedWorkflow, PlannerError, PlannerPort},
    run_store::{RunStorePort, StoreError},
    tool_executor::ToolExecutorPort,
};
pub use use_cases::continue_run::{ContinueRunError, ContinueRunInput, ContinueRunUseCase};
pub use use_cases::run_workflow::{
    RunReport, RunWorkflowError, RunWorkflowInput, RunWorkflowUseCase,
};
