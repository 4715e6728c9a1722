//! Ollama planner adapter.
//!
//! Implements [`PlannerPort`] over Ollama's `/api/chat` endpoint. The
//! model is instructed to emit a strict-JSON array of tool calls; the
//! adapter extracts the array best-effort (first `[` to last `]`), makes
//! one repair attempt when the output is not valid JSON, then filters the
//! parsed items down to well-formed calls on known tools.

use async_trait::async_trait;
use relay_application::{PlannedWorkflow, PlannerError, PlannerPort};
use relay_domain::{Context, FieldKind, TOOL_SCHEMAS, ToolCall};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::OllamaConfig;

const SYSTEM_PROMPT: &str = r#"You are a strict JSON planner for a workflow automation agent.

You MUST output ONLY valid JSON (no markdown, no text).
Output must be a JSON array of tool calls.

Each tool call MUST be exactly:
{"name": "<tool_name>", "args": { ... }}

Rules:
- Use ONLY tools from the registry.
- Do NOT invent new tools.
- Do NOT include extra keys (only "name" and "args").
- Args MUST match the args_schema types.
- Prefer using values from Context JSON.
- If a required arg is missing from context, include the key with an empty string "" (for strings) or [] (for lists).
- Maximum number of tool calls: MAX_STEPS.

Correct examples:
[
  {"name":"summarize_text","args":{"text":"..."}},
  {"name":"draft_email","args":{"to":"team@company.com","subject":"Follow-up","bullet_points":["a","b"]}},
  {"name":"schedule_reminder","args":{"when":"tomorrow 09:00","note":"Follow up"}}
]
"#;

/// Planner backed by a local Ollama server.
pub struct OllamaPlanner {
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_steps: usize,
}

impl OllamaPlanner {
    pub fn new(config: &OllamaConfig, max_steps: usize) -> Result<Self, PlannerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| PlannerError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_steps,
        })
    }

    async fn chat(&self, system: &str, prompt: &str) -> Result<String, PlannerError> {
        #[derive(Deserialize)]
        struct ChatMessage {
            content: String,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            message: ChatMessage,
        }

        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt},
            ],
            "stream": false,
            "options": {"temperature": self.temperature},
        });

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| PlannerError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| PlannerError::Unavailable(e.to_string()))?;

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| PlannerError::InvalidOutput(e.to_string()))?;
        Ok(parsed.message.content)
    }
}

#[async_trait]
impl PlannerPort for OllamaPlanner {
    async fn plan(
        &self,
        goal: &str,
        context: Option<&Context>,
    ) -> Result<PlannedWorkflow, PlannerError> {
        let prompt = make_prompt(goal, context, self.max_steps);
        let mut raw = self.chat(SYSTEM_PROMPT, &prompt).await?;

        let parsed = match extract_json_array(&raw) {
            Ok(value) => value,
            Err(first_error) => {
                // One repair attempt: ask the model to fix JSON only.
                warn!(error = %first_error, "planner output was not valid JSON, retrying");
                let repair_system =
                    format!("{SYSTEM_PROMPT}\nIf the previous output was invalid, fix it and output ONLY valid JSON.");
                let repair_prompt = format!("Fix this into valid JSON array ONLY:\n\n{raw}");
                raw = self.chat(&repair_system, &repair_prompt).await?;
                extract_json_array(&raw).map_err(PlannerError::InvalidOutput)?
            }
        };

        let plan = filter_plan(&parsed, self.max_steps);
        debug!(calls = plan.len(), "planner produced a plan");
        Ok(PlannedWorkflow {
            plan,
            raw_output: raw,
        })
    }
}

/// Tool registry description injected into the planner prompt.
fn tool_specs() -> Value {
    let specs: Vec<Value> = TOOL_SCHEMAS
        .iter()
        .map(|schema| {
            let mut args_schema = serde_json::Map::new();
            for field in schema.fields {
                let ty = match field.kind {
                    FieldKind::Text { .. } => "string",
                    FieldKind::TextList => "string[]",
                };
                args_schema.insert(field.name.to_string(), Value::String(ty.to_string()));
            }
            json!({
                "name": schema.tool,
                "description": schema.description,
                "args_schema": args_schema,
            })
        })
        .collect();
    Value::Array(specs)
}

fn make_prompt(goal: &str, context: Option<&Context>, max_steps: usize) -> String {
    let specs = serde_json::to_string_pretty(&tool_specs()).unwrap_or_else(|_| "[]".to_string());
    let context_json = context
        .and_then(|c| serde_json::to_string_pretty(&Value::Object(c.clone())).ok())
        .unwrap_or_else(|| "null".to_string());

    format!(
        "Tool registry (name, description, args schema):\n{specs}\n\n\
         MAX_STEPS = {max_steps}\n\n\
         User goal:\n{goal}\n\n\
         Context JSON (may be null):\n{context_json}\n\n\
         Return ONLY the JSON array plan now."
    )
}

/// Best-effort extraction of a JSON array from model output.
///
/// Locates the first `[` and the last `]` and parses the slice between
/// them, tolerating prose before and after.
fn extract_json_array(text: &str) -> Result<Value, String> {
    let text = text.trim();
    let candidate = if text.starts_with('[') && text.ends_with(']') {
        text
    } else {
        let start = text.find('[');
        let end = text.rfind(']');
        match (start, end) {
            (Some(start), Some(end)) if end > start => &text[start..=end],
            _ => return Err("could not find a JSON array in model output".to_string()),
        }
    };
    serde_json::from_str(candidate).map_err(|e| e.to_string())
}

/// Keep only well-formed calls on known tools, truncated to `max_steps`.
fn filter_plan(parsed: &Value, max_steps: usize) -> Vec<ToolCall> {
    let Some(items) = parsed.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .take(max_steps)
        .filter_map(|item| {
            let object = item.as_object()?;
            let name = object.get("name")?.as_str()?;
            if !relay_domain::known_tools().any(|tool| tool == name) {
                return None;
            }
            let args = object.get("args").cloned().unwrap_or_else(|| json!({}));
            if !args.is_object() {
                return None;
            }
            Some(ToolCall {
                name: name.to_string(),
                args,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ==================== extract_json_array ====================

    #[test]
    fn parses_bare_array() {
        let value = extract_json_array(r#"[{"name":"create_tasks","args":{}}]"#).unwrap();
        assert!(value.is_array());
    }

    #[test]
    fn tolerates_surrounding_prose() {
        let value = extract_json_array(
            "Sure! Here is the plan:\n[{\"name\":\"create_tasks\",\"args\":{}}]\nHope that helps.",
        )
        .unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn rejects_output_without_array() {
        assert!(extract_json_array("no plan here").is_err());
        assert!(extract_json_array("]broken[").is_err());
    }

    // ==================== filter_plan ====================

    #[test]
    fn drops_unknown_tools_and_malformed_items() {
        let parsed = json!([
            {"name": "summarize_text", "args": {"text": "hi"}},
            {"name": "made_up_tool", "args": {}},
            {"name": "create_tasks", "args": "not an object"},
            "not even an object",
            {"name": "draft_email"},
        ]);
        let plan = filter_plan(&parsed, 8);
        let names: Vec<&str> = plan.iter().map(|c| c.name.as_str()).collect();
        // draft_email without args gets an empty object, not dropped.
        assert_eq!(names, vec!["summarize_text", "draft_email"]);
        assert_eq!(plan[1].args, json!({}));
    }

    #[test]
    fn truncates_to_max_steps() {
        let parsed = json!([
            {"name": "create_tasks", "args": {}},
            {"name": "create_tasks", "args": {}},
            {"name": "create_tasks", "args": {}},
        ]);
        assert_eq!(filter_plan(&parsed, 2).len(), 2);
    }

    // ==================== make_prompt ====================

    #[test]
    fn prompt_includes_registry_goal_and_context() {
        let context = json!({"text": "notes"}).as_object().cloned().unwrap();
        let prompt = make_prompt("summarize my notes", Some(&context), 8);
        assert!(prompt.contains("summarize_text"));
        assert!(prompt.contains("MAX_STEPS = 8"));
        assert!(prompt.contains("summarize my notes"));
        assert!(prompt.contains("\"text\": \"notes\""));

        let prompt = make_prompt("goal", None, 8);
        assert!(prompt.contains("Context JSON (may be null):\nnull"));
    }
}
