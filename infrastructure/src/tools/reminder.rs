//! `schedule_reminder`: records a reminder note for a point in time.

use chrono::Local;
use relay_domain::ArgMap;
use serde_json::{Value, json};

use super::BuiltinTool;

pub struct ScheduleReminderTool;

impl BuiltinTool for ScheduleReminderTool {
    fn name(&self) -> &'static str {
        "schedule_reminder"
    }

    fn run(&self, args: &ArgMap) -> Result<Value, String> {
        let when = args
            .get("when")
            .and_then(Value::as_str)
            .unwrap_or("tomorrow 09:00");
        let note = args
            .get("note")
            .and_then(Value::as_str)
            .unwrap_or("Reminder");
        let created_at = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();

        Ok(json!({
            "scheduled_for": when,
            "note": note,
            "created_at": created_at,
        }))
    }
}
