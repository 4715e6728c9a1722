//! Context fill: completes tool arguments from caller-supplied context.
//!
//! When the planner leaves a canonical argument empty, the value may still
//! be present in the side-channel context the caller submitted with the
//! goal (free text, email fields, task titles). For each known tool and
//! field, an absent or falsy argument is filled from the context key of
//! the same name, provided the context value has the expected JSON shape.
//!
//! A present, truthy argument is never overwritten.

use serde_json::Value;

use super::entities::{ArgMap, Context};

/// Expected shape of a fillable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Text,
    List,
}

/// Known fillable fields per tool.
fn fillable_fields(tool_name: &str) -> &'static [(&'static str, Shape)] {
    match tool_name {
        "summarize_text" => &[("text", Shape::Text)],
        "draft_email" => &[
            ("to", Shape::Text),
            ("subject", Shape::Text),
            ("bullet_points", Shape::List),
        ],
        "create_tasks" => &[("tasks", Shape::List)],
        "schedule_reminder" => &[("when", Shape::Text), ("note", Shape::Text)],
        _ => &[],
    }
}

/// Whether a value counts as "empty" for fill purposes.
///
/// Mirrors truthiness of the planner wire format: null, `false`, zero,
/// empty string, empty array, and empty object are all fillable.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn matches_shape(value: &Value, shape: Shape) -> bool {
    match shape {
        Shape::Text => value.is_string(),
        Shape::List => value.is_array(),
    }
}

/// Fill absent or falsy canonical arguments of `tool_name` from `context`.
///
/// Unknown tools and unrecognized fields are untouched. Pure function.
pub fn fill_from_context(tool_name: &str, args: &ArgMap, context: &Context) -> ArgMap {
    let mut out = args.clone();

    for (field, shape) in fillable_fields(tool_name) {
        let current_is_empty = out.get(*field).is_none_or(is_falsy);
        if !current_is_empty {
            continue;
        }
        if let Some(value) = context.get(*field) {
            if matches_shape(value, *shape) {
                out.insert((*field).to_string(), value.clone());
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> ArgMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn fills_missing_text_field() {
        let out = fill_from_context(
            "summarize_text",
            &ArgMap::new(),
            &map(json!({"text": "line1\nline2"})),
        );
        assert_eq!(out["text"], "line1\nline2");
    }

    #[test]
    fn fills_empty_string_field() {
        let out = fill_from_context(
            "schedule_reminder",
            &map(json!({"when": "", "note": ""})),
            &map(json!({"when": "tomorrow 9am", "note": "call client"})),
        );
        assert_eq!(out["when"], "tomorrow 9am");
        assert_eq!(out["note"], "call client");
    }

    #[test]
    fn never_overwrites_truthy_value() {
        let out = fill_from_context(
            "draft_email",
            &map(json!({"to": "keep@company.com"})),
            &map(json!({"to": "other@company.com", "subject": "Filled"})),
        );
        assert_eq!(out["to"], "keep@company.com");
        assert_eq!(out["subject"], "Filled");
    }

    #[test]
    fn rejects_context_value_of_wrong_shape() {
        // `bullet_points` expects an array; a string in context is ignored.
        let out = fill_from_context(
            "draft_email",
            &ArgMap::new(),
            &map(json!({"bullet_points": "not a list", "tasks": "also not"})),
        );
        assert!(!out.contains_key("bullet_points"));

        let out = fill_from_context(
            "create_tasks",
            &ArgMap::new(),
            &map(json!({"tasks": ["a", "b"]})),
        );
        assert_eq!(out["tasks"], json!(["a", "b"]));
    }

    #[test]
    fn unknown_tool_is_untouched() {
        let args = map(json!({"x": ""}));
        let out = fill_from_context("mystery_tool", &args, &map(json!({"x": "filled"})));
        assert_eq!(out, args);
    }

    #[test]
    fn empty_list_counts_as_fillable() {
        let out = fill_from_context(
            "create_tasks",
            &map(json!({"tasks": []})),
            &map(json!({"tasks": ["write report"]})),
        );
        assert_eq!(out["tasks"], json!(["write report"]));
    }
}
