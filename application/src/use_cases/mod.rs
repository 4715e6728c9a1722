//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod continue_run;
pub(crate) mod execute_plan;
pub mod run_workflow;
