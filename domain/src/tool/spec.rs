//! Declarative argument schemas for the built-in tools.
//!
//! Each tool declares its fields once; [`validate_args`](super::validation::validate_args)
//! interprets the declaration. The tool set is a closed table; adding a
//! tool means adding a schema here and an implementation in the
//! infrastructure registry.

/// Kind of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Required string with a minimum length.
    Text { min_len: usize },
    /// Array of strings. Defaults to empty; a non-array input is coerced
    /// to a single-element list (scalars stringified) before validation.
    TextList,
}

/// One field of a tool's argument schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn text(name: &'static str, min_len: usize) -> Self {
        Self {
            name,
            kind: FieldKind::Text { min_len },
        }
    }

    const fn list(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::TextList,
        }
    }
}

/// Argument schema for one tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolSchema {
    pub tool: &'static str,
    /// Short description, surfaced to the planner prompt.
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

/// The closed set of tool schemas, in registration order.
pub const TOOL_SCHEMAS: &[ToolSchema] = &[
    ToolSchema {
        tool: "summarize_text",
        description: "Summarize a text block.",
        fields: &[FieldSpec::text("text", 1)],
    },
    ToolSchema {
        tool: "draft_email",
        description: "Draft an email with bullet points.",
        fields: &[
            FieldSpec::text("to", 3),
            FieldSpec::text("subject", 1),
            FieldSpec::list("bullet_points"),
        ],
    },
    ToolSchema {
        tool: "create_tasks",
        description: "Create task items from a list of task titles.",
        fields: &[FieldSpec::list("tasks")],
    },
    ToolSchema {
        tool: "schedule_reminder",
        description: "Schedule a reminder note for a time.",
        fields: &[FieldSpec::text("when", 1), FieldSpec::text("note", 1)],
    },
];

/// Look up the schema for a tool name.
pub fn schema_for(tool: &str) -> Option<&'static ToolSchema> {
    TOOL_SCHEMAS.iter().find(|schema| schema.tool == tool)
}

/// Names of all schema-known tools, in registration order.
pub fn known_tools() -> impl Iterator<Item = &'static str> {
    TOOL_SCHEMAS.iter().map(|schema| schema.tool)
}
