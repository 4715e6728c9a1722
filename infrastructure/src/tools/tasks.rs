//! `create_tasks`: turns task titles into task records with short ids.

use relay_domain::ArgMap;
use serde_json::{Value, json};

use super::BuiltinTool;

pub struct CreateTasksTool;

impl BuiltinTool for CreateTasksTool {
    fn name(&self) -> &'static str {
        "create_tasks"
    }

    fn run(&self, args: &ArgMap) -> Result<Value, String> {
        let titles: Vec<String> = match args.get("tasks") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).unwrap_or_else(|| item.to_string()))
                .collect(),
            Some(other) => vec![other.to_string()],
            None => Vec::new(),
        };

        let created: Vec<Value> = titles
            .into_iter()
            .map(|title| {
                let id: String = uuid::Uuid::new_v4().to_string().chars().take(8).collect();
                json!({"id": id, "title": title})
            })
            .collect();

        Ok(json!({"created": created}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> ArgMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn creates_one_record_per_title() {
        let out = CreateTasksTool
            .run(&args(json!({"tasks": ["write report", "send invoice"]})))
            .unwrap();
        let created = out["created"].as_array().unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(created[0]["title"], "write report");
        assert_eq!(created[0]["id"].as_str().unwrap().len(), 8);
    }

    #[test]
    fn empty_task_list_creates_nothing() {
        let out = CreateTasksTool.run(&args(json!({"tasks": []}))).unwrap();
        assert_eq!(out["created"], json!([]));
    }
}
