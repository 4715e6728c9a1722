//! Run report rendering.
//!
//! Turns a persisted [`RunRecord`] into a Markdown audit report, plus a
//! dependency-free Markdown-to-HTML pass good enough for the report's
//! subset (headings, bullets, fenced code blocks).

use chrono::{Local, TimeZone};
use relay_domain::RunRecord;
use serde_json::Value;

/// Local-time timestamp for display, empty when unset.
pub fn format_timestamp(ts: i64) -> String {
    if ts == 0 {
        return String::new();
    }
    Local
        .timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn push_json_block(md: &mut Vec<String>, value: &Value) {
    md.push("```json".to_string());
    md.push(pretty(value));
    md.push("```".to_string());
}

/// Build the Markdown audit report for a stored run.
pub fn build_markdown_report(run: &RunRecord) -> String {
    let mut md = Vec::new();

    md.push("# Workflow Agent Report\n".to_string());
    md.push(format!("- **Run ID:** `{}`", run.run_id));
    md.push(format!("- **Created:** {}", format_timestamp(run.created_at)));
    md.push(format!("- **Status:** `{}`", run.status));
    md.push(format!("\n## Goal\n{}\n", run.user_goal));

    md.push("## Final Answer\n".to_string());
    if run.final_answer.is_empty() {
        md.push("_(empty)_".to_string());
    } else {
        md.push(run.final_answer.clone());
    }
    md.push(String::new());

    if let Some(context) = &run.context {
        md.push("## Context\n".to_string());
        push_json_block(&mut md, &Value::Object(context.clone()));
        md.push(String::new());
    }

    if let Some(plan) = &run.proposed_plan {
        md.push("## Proposed Plan (Tool Calls)\n".to_string());
        let plan = serde_json::to_value(plan).unwrap_or(Value::Null);
        push_json_block(&mut md, &plan);
        md.push(String::new());
    }

    md.push("## Execution Steps (Audit Log)\n".to_string());
    for (i, step) in run.steps.iter().enumerate() {
        md.push(format!("### Step {}", i + 1));
        if !step.thought.is_empty() {
            md.push(format!("**Thought:** {}\n", step.thought));
        }

        if let Some(tool_call) = &step.tool_call {
            md.push("**Tool call:**".to_string());
            let call = serde_json::to_value(tool_call).unwrap_or(Value::Null);
            push_json_block(&mut md, &call);
        }

        if let Some(tool_result) = &step.tool_result {
            md.push("**Tool result:**".to_string());
            push_json_block(&mut md, tool_result);
        }

        md.push(String::new());
    }

    md.join("\n")
}

fn esc(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Very basic Markdown-ish HTML renderer.
///
/// Keeps code blocks and paragraphs readable; not a general Markdown
/// implementation.
pub fn markdown_to_basic_html(md_text: &str) -> String {
    let mut html = Vec::new();
    html.push("<!doctype html><html><head><meta charset='utf-8'>".to_string());
    html.push("<title>Workflow Agent Report</title>".to_string());
    html.push(
        "<style>body{font-family:system-ui;max-width:980px;margin:24px auto;padding:0 12px;}\
         pre{background:#f6f6f6;padding:12px;border-radius:10px;overflow:auto;}\
         code{font-family:ui-monospace,Menlo,monospace;}h1,h2,h3{margin-top:20px;}</style>"
            .to_string(),
    );
    html.push("</head><body>".to_string());

    let mut in_code = false;
    for line in md_text.lines() {
        if line.starts_with("```") {
            if in_code {
                html.push("</code></pre>".to_string());
            } else {
                html.push("<pre><code>".to_string());
            }
            in_code = !in_code;
            continue;
        }

        if in_code {
            html.push(esc(line));
        } else if let Some(rest) = line.strip_prefix("# ") {
            html.push(format!("<h1>{}</h1>", esc(rest)));
        } else if let Some(rest) = line.strip_prefix("## ") {
            html.push(format!("<h2>{}</h2>", esc(rest)));
        } else if let Some(rest) = line.strip_prefix("### ") {
            html.push(format!("<h3>{}</h3>", esc(rest)));
        } else if line.trim().is_empty() {
            html.push("<br/>".to_string());
        } else {
            html.push(format!("<p>{}</p>", esc(line)));
        }
    }

    if in_code {
        html.push("</code></pre>".to_string());
    }

    html.push("</body></html>".to_string());
    html.join("\n")
}
