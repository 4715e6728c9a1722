//! Tool subdomain: argument schemas, validation, and the call error
//! taxonomy.
//!
//! The concrete tool implementations live in the infrastructure layer;
//! this module owns everything that can be decided without executing
//! anything: which tools exist, what arguments they take, and what a
//! failed call looks like.

pub mod error;
pub mod spec;
pub mod validation;

pub use error::{CallError, ValidationDetail};
pub use spec::{FieldKind, FieldSpec, TOOL_SCHEMAS, ToolSchema, known_tools, schema_for};
pub use validation::validate_args;
