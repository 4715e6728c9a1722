//! Argument validation against the per-tool schemas.
//!
//! Validation runs after normalization and context fill. On success it
//! returns a *sanitized* argument map (exactly the schema's fields, with
//! canonical JSON types) and that sanitized map, not the raw input, is
//! what gets executed and logged. On failure it returns a
//! [`CallError::Validation`] with one detail per failing field.

use serde_json::Value;

use super::error::{CallError, ValidationDetail};
use super::spec::{FieldKind, schema_for};
use crate::plan::ArgMap;

/// Validate `args` for `tool_name`.
///
/// * Unknown tool → [`CallError::UnknownTool`].
/// * Schema failure → [`CallError::Validation`] carrying the tool name and
///   the dotted path plus reason for every failing field, in schema order.
/// * Success → sanitized copy of the arguments.
pub fn validate_args(tool_name: &str, args: &ArgMap) -> Result<ArgMap, CallError> {
    let Some(schema) = schema_for(tool_name) else {
        return Err(CallError::unknown_tool(tool_name));
    };

    let mut clean = ArgMap::new();
    let mut details = Vec::new();

    for field in schema.fields {
        match field.kind {
            FieldKind::Text { min_len } => match args.get(field.name) {
                None | Some(Value::Null) => {
                    details.push(ValidationDetail::new(field.name, "field required"));
                }
                Some(Value::String(s)) if s.chars().count() < min_len => {
                    details.push(ValidationDetail::new(field.name, "string too short"));
                }
                Some(Value::String(s)) => {
                    clean.insert(field.name.to_string(), Value::String(s.clone()));
                }
                Some(_) => {
                    details.push(ValidationDetail::new(field.name, "expected a string"));
                }
            },
            FieldKind::TextList => {
                let items = coerce_string_list(args.get(field.name));
                clean.insert(
                    field.name.to_string(),
                    Value::Array(items.into_iter().map(Value::String).collect()),
                );
            }
        }
    }

    if details.is_empty() {
        Ok(clean)
    } else {
        Err(CallError::validation(tool_name, details))
    }
}

/// Coerce a JSON value into a list of strings.
///
/// Absent/null → empty list; an array keeps its order with every element
/// stringified; any other value becomes a single-element list.
fn coerce_string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(stringify).collect(),
        Some(other) => vec![stringify(other)],
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
