//! Ports: interfaces the application layer depends on.
//!
//! Adapters implementing these live in the infrastructure layer.

pub mod planner;
pub mod run_store;
pub mod tool_executor;

pub use planner::{PlannedWorkflow, PlannerError, PlannerPort};
pub use run_store::{RunStorePort, StoreError};
pub use tool_executor::ToolExecutorPort;
