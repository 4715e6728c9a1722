//! Planner adapters.

pub mod ollama;

pub use ollama::OllamaPlanner;
