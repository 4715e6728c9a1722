//! `summarize_text`: first-lines extractive summary.

use relay_domain::ArgMap;
use serde_json::{Value, json};

use super::BuiltinTool;

/// Number of non-empty lines kept in a summary.
const SUMMARY_LINES: usize = 8;

pub struct SummarizeTextTool;

impl BuiltinTool for SummarizeTextTool {
    fn name(&self) -> &'static str {
        "summarize_text"
    }

    fn run(&self, args: &ArgMap) -> Result<Value, String> {
        let text = args
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim();

        if text.is_empty() {
            return Ok(json!({"summary": "(no text provided)"}));
        }

        let summary: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(SUMMARY_LINES)
            .collect();

        Ok(json!({"summary": summary.join("\n")}))
    }
}
