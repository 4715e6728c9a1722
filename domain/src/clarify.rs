//! Clarification: turning validation failures into user-facing questions.
//!
//! When validation fails on field-level problems, the run pauses and the
//! user is asked for the missing values instead of the run failing
//! outright. This module derives the [`MissingField`] records from a
//! [`CallError`] and renders them as natural-language questions.

use serde::{Deserialize, Serialize};

use crate::tool::CallError;

/// A required field the planner could not supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingField {
    pub tool: String,
    pub field: String,
    pub reason: String,
}

/// Extract missing-field records from a call error.
///
/// Only `validation_error` carries field-level detail; every other kind
/// yields an empty list. Each detail maps 1:1 to a record, taking the
/// last path segment as the field name.
pub fn extract_missing_fields(error: &CallError) -> Vec<MissingField> {
    let CallError::Validation { tool, details, .. } = error else {
        return Vec::new();
    };

    details
        .iter()
        .map(|detail| MissingField {
            tool: tool.clone(),
            field: detail.field().to_string(),
            reason: detail.msg.clone(),
        })
        .collect()
}

/// Question template for one known tool/field pair.
fn question_template(tool: &str, field: &str) -> Option<&'static str> {
    Some(match (tool, field) {
        ("draft_email", "to") => "Who should I email? (provide an address like team@company.com)",
        ("draft_email", "subject") => "What should the email subject be?",
        ("draft_email", "bullet_points") => "What bullet points should I include in the email?",
        ("schedule_reminder", "when") => {
            "When should I schedule the reminder? (e.g., tomorrow 09:00)"
        }
        ("schedule_reminder", "note") => "What should the reminder say?",
        ("summarize_text", "text") => "What text should I summarize? Paste it in the context.",
        ("create_tasks", "tasks") => "What tasks should I create? Provide a list of task titles.",
        _ => return None,
    })
}

const TEMPLATED_TOOLS: &[&str] = &[
    "draft_email",
    "schedule_reminder",
    "summarize_text",
    "create_tasks",
];

/// Turn missing-field records into clarification questions.
///
/// Fields are grouped by tool (first-seen tool order preserved). Known
/// tools emit one templated question per missing field; any other tool
/// gets a single catch-all question listing its field names. Identical
/// questions are deduplicated, keeping the first occurrence.
pub fn questions_for_missing(missing: &[MissingField]) -> Vec<String> {
    // Group by tool, preserving first-seen order.
    let mut by_tool: Vec<(&str, Vec<&MissingField>)> = Vec::new();
    for m in missing {
        match by_tool.iter_mut().find(|(tool, _)| *tool == m.tool) {
            Some((_, items)) => items.push(m),
            None => by_tool.push((&m.tool, vec![m])),
        }
    }

    let mut questions = Vec::new();
    for (tool, items) in &by_tool {
        if TEMPLATED_TOOLS.contains(tool) {
            for item in items {
                if let Some(q) = question_template(tool, &item.field) {
                    questions.push(q.to_string());
                }
            }
        } else {
            let fields: Vec<&str> = items.iter().map(|i| i.field.as_str()).collect();
            questions.push(format!(
                "I need more info for tool `{tool}`: {}",
                fields.join(", ")
            ));
        }
    }

    // Deduplicate while preserving first occurrence.
    let mut seen = std::collections::HashSet::new();
    questions.retain(|q| seen.insert(q.clone()));
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ValidationDetail;

    fn missing(tool: &str, field: &str) -> MissingField {
        MissingField {
            tool: tool.to_string(),
            field: field.to_string(),
            reason: "field required".to_string(),
        }
    }

    // ==================== extract_missing_fields ====================

    #[test]
    fn extracts_one_record_per_detail() {
        let err = CallError::validation(
            "draft_email",
            vec![
                ValidationDetail::new("to", "field required"),
                ValidationDetail::new("subject", "string too short"),
            ],
        );
        let out = extract_missing_fields(&err);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], missing("draft_email", "to"));
        assert_eq!(out[1].reason, "string too short");
    }

    #[test]
    fn non_validation_errors_yield_nothing() {
        assert!(extract_missing_fields(&CallError::unknown_tool("x")).is_empty());
        assert!(extract_missing_fields(&CallError::runtime("boom")).is_empty());
    }

    #[test]
    fn empty_loc_maps_to_unknown_field() {
        let err = CallError::validation(
            "draft_email",
            vec![ValidationDetail {
                loc: vec![],
                msg: "invalid".to_string(),
            }],
        );
        assert_eq!(extract_missing_fields(&err)[0].field, "unknown");
    }

    // ==================== questions_for_missing ====================

    #[test]
    fn renders_templated_question_per_field() {
        let qs = questions_for_missing(&[
            missing("draft_email", "to"),
            missing("draft_email", "subject"),
        ]);
        assert_eq!(
            qs,
            vec![
                "Who should I email? (provide an address like team@company.com)",
                "What should the email subject be?",
            ]
        );
    }

    #[test]
    fn unknown_tool_gets_catch_all_question() {
        let qs = questions_for_missing(&[
            missing("mystery_tool", "alpha"),
            missing("mystery_tool", "beta"),
        ]);
        assert_eq!(qs, vec!["I need more info for tool `mystery_tool`: alpha, beta"]);
    }

    #[test]
    fn preserves_first_seen_tool_order() {
        let qs = questions_for_missing(&[
            missing("schedule_reminder", "when"),
            missing("draft_email", "subject"),
            missing("schedule_reminder", "note"),
        ]);
        assert_eq!(
            qs,
            vec![
                "When should I schedule the reminder? (e.g., tomorrow 09:00)",
                "What should the reminder say?",
                "What should the email subject be?",
            ]
        );
    }

    #[test]
    fn deduplicates_identical_questions() {
        let qs = questions_for_missing(&[
            missing("summarize_text", "text"),
            missing("summarize_text", "text"),
        ]);
        assert_eq!(qs.len(), 1);
    }
}
