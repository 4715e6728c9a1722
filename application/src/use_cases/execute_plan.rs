//! Plan executor: the validation / clarification state machine.
//!
//! One pass over a bounded plan. Per call, in order:
//!
//! ```text
//! normalize ──> context fill ──> registered? ──no──> skip (unknown_tool step)
//!                                    │yes
//!                                validate ──field-level failure──> PAUSE (NeedsInput)
//!                                    │ok          └─other failure──> skip (recorded)
//!                                 execute ──Err──> recorded as tool_runtime_error, continue
//!                                    │Ok
//!                                 recorded, next call
//! ```
//!
//! The pause is the only early exit: it returns a structured
//! [`RunOutcome::NeedsInput`] carrying the missing fields, the generated
//! questions, and the **original, unexecuted** plan so continuation can
//! replay it. No error of any kind escapes this function.

use relay_domain::{
    CallError, Context, NEEDS_INPUT_MESSAGE, PLANNER_STEP_NAME, RunOutcome, Step, ToolCall,
    extract_missing_fields, fill_from_context, normalize_args, questions_for_missing,
    validate_args,
};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::ports::tool_executor::ToolExecutorPort;

/// Result of one execution pass: terminal outcome plus the audit log.
#[derive(Debug)]
pub(crate) struct PlanExecution {
    pub outcome: RunOutcome,
    pub steps: Vec<Step>,
}

/// Wrap a call error the way it appears in a step's `tool_result`.
fn error_result(error: &CallError) -> Value {
    json!({ "error": error })
}

/// Synthetic leading audit step recording the planner's own invocation.
///
/// Appended only when starting a fresh run, never when resuming.
pub(crate) fn planner_step(goal: &str, plan: &[ToolCall], raw_output: &str) -> Step {
    Step::new(
        "Planner produced tool calls.",
        Some(ToolCall::new(PLANNER_STEP_NAME).with_arg("user_goal", goal)),
    )
    .with_result(json!({ "plan": plan, "raw_output": raw_output }))
}

/// Execute `plan[..max_steps]` against the tool executor.
pub(crate) async fn execute_plan(
    tools: &dyn ToolExecutorPort,
    plan: &[ToolCall],
    context: &Context,
    max_steps: usize,
    leading_step: Option<Step>,
) -> PlanExecution {
    let mut steps: Vec<Step> = Vec::new();
    if let Some(step) = leading_step {
        steps.push(step);
    }

    for call in plan.iter().take(max_steps) {
        let name = call.name.as_str();
        let args = normalize_args(name, &call.args);
        let args = fill_from_context(name, &args, context);

        if !tools.has_tool(name) {
            warn!(tool = name, "planner returned an unknown tool, skipping");
            steps.push(
                Step::new("Planner returned an unknown tool. Skipping.", Some(call.clone()))
                    .with_result(error_result(&CallError::unknown_tool(name))),
            );
            continue;
        }

        let mut validating = Step::new(format!("Validating tool args: {name}"), Some(call.clone()));
        match validate_args(name, &args) {
            Err(error) => {
                validating.tool_result = Some(error_result(&error));
                steps.push(validating);

                let missing = extract_missing_fields(&error);
                if missing.is_empty() {
                    // Not a field-level problem; treat as a recoverable skip.
                    debug!(tool = name, %error, "validation failed without field detail, skipping");
                    continue;
                }

                let questions = questions_for_missing(&missing);
                warn!(
                    tool = name,
                    missing = missing.len(),
                    "pausing run to request missing input"
                );
                return PlanExecution {
                    outcome: RunOutcome::NeedsInput {
                        final_answer: NEEDS_INPUT_MESSAGE.to_string(),
                        missing_fields: missing,
                        questions,
                        proposed_plan: plan.to_vec(),
                    },
                    steps,
                };
            }
            Ok(clean) => {
                steps.push(validating);

                let mut executing = Step::new(
                    format!("Calling tool: {name}"),
                    Some(ToolCall::new(name).with_args(clean.clone())),
                );
                executing.tool_result = Some(match tools.execute(name, &clean).await {
                    Ok(result) => result,
                    Err(message) => {
                        warn!(tool = name, error = %message, "tool failed at runtime");
                        error_result(&CallError::runtime(message))
                    }
                });
                steps.push(executing);
            }
        }
    }

    PlanExecution {
        outcome: RunOutcome::Ok {
            final_answer: compose_final_answer(&steps),
        },
        steps,
    }
}

/// Aggregate successful (and recorded-error) tool results into the final
/// textual answer: one `"<tool>: <result>"` line per completed step under
/// a fixed "Done." header, or exactly "Done." when there are none.
fn compose_final_answer(steps: &[Step]) -> String {
    let mut parts: Vec<String> = Vec::new();
    for step in steps {
        let Some(call) = &step.tool_call else { continue };
        if call.name.is_empty() || call.name == PLANNER_STEP_NAME {
            continue;
        }
        let Some(result) = &step.tool_result else { continue };
        parts.push(format!("{}: {result}", call.name));
    }

    if parts.is_empty() {
        "Done.".to_string()
    } else {
        format!("Done.\n\n{}", parts.join("\n"))
    }
}
