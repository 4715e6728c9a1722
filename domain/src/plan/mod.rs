//! Plan subdomain: tool calls and the argument-repair pipeline.
//!
//! A plan is an ordered sequence of [`ToolCall`]s. Before validation each
//! call's arguments pass through two pure stages:
//!
//! 1. [`normalize_args`]: rewrite known planner synonyms to canonical keys
//! 2. [`fill_from_context`]: fill still-missing keys from caller context

pub mod context_fill;
pub mod entities;
pub mod normalize;

pub use context_fill::fill_from_context;
pub use entities::{ArgMap, Context, ToolCall};
pub use normalize::normalize_args;
