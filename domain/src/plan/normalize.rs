//! Argument normalization: maps common planner mistakes to canonical keys.
//!
//! LLM planners regularly invent near-miss argument names (`recipient`
//! instead of `to`, `time` instead of `when`). Each affected tool has a
//! fixed synonym table; a synonym is copied to its canonical key only when
//! the canonical key is absent, so canonical values always win over aliases.
//!
//! Pure and idempotent: applying it twice yields the same map as once.

use serde_json::Value;

use super::entities::ArgMap;

/// Synonym table for `draft_email` arguments.
const EMAIL_KEYS: &[(&str, &str)] = &[
    ("email_to", "to"),
    ("recipient", "to"),
    ("email_subject", "subject"),
    ("title", "subject"),
    ("bullets", "bullet_points"),
    ("bulletpoints", "bullet_points"),
];

/// Synonym table for `schedule_reminder` arguments.
const REMINDER_KEYS: &[(&str, &str)] = &[
    ("time", "when"),
    ("datetime", "when"),
    ("message", "note"),
    ("text", "note"),
];

fn canonical_key(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
}

/// Rewrite known alias keys in `args` to the canonical names `tool_name`
/// expects.
///
/// A non-object `args` value yields an empty map. Tools without a synonym
/// table pass through unchanged.
pub fn normalize_args(tool_name: &str, args: &Value) -> ArgMap {
    let Some(args) = args.as_object() else {
        return ArgMap::new();
    };

    let table: &[(&str, &str)] = match tool_name {
        "draft_email" => EMAIL_KEYS,
        "schedule_reminder" => REMINDER_KEYS,
        _ => return args.clone(),
    };

    let mut out = args.clone();
    for (key, value) in args {
        if let Some(canonical) = canonical_key(table, key) {
            if !out.contains_key(canonical) {
                out.insert(canonical.to_string(), value.clone());
            }
        }
    }
    out
}
