//! `draft_email`: renders a short follow-up email from bullet points.

use relay_domain::ArgMap;
use serde_json::{Value, json};

use super::BuiltinTool;

/// Bullet points beyond this count are dropped from the body.
const MAX_BULLETS: usize = 10;

pub struct DraftEmailTool;

impl BuiltinTool for DraftEmailTool {
    fn name(&self) -> &'static str {
        "draft_email"
    }

    fn run(&self, args: &ArgMap) -> Result<Value, String> {
        let to = args
            .get("to")
            .and_then(Value::as_str)
            .unwrap_or("team@company.com");
        let subject = args
            .get("subject")
            .and_then(Value::as_str)
            .unwrap_or("Follow-up");

        let mut body = String::from("Hi,\n\nFollowing up:\n");
        if let Some(bullets) = args.get("bullet_points").and_then(Value::as_array) {
            for bullet in bullets.iter().take(MAX_BULLETS) {
                let line = bullet.as_str().map(str::to_string).unwrap_or_else(|| bullet.to_string());
                body.push_str(&format!("- {line}\n"));
            }
        }
        body.push_str("\nBest,\n");

        Ok(json!({"to": to, "subject": subject, "body": body}))
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
    fn renders_bullets_into_body() {
        let out = DraftEmailTool
            .run(&args(json!({
                "to": "a@b.com",
                "subject": "Weekly sync",
                "bullet_points": ["ship it", "test it"],
            })))
            .unwrap();

        assert_eq!(out["to"], "a@b.com");
        assert_eq!(out["subject"], "Weekly sync");
        let body = out["body"].as_str().unwrap();
        assert!(body.contains("- ship it\n"));
        assert!(body.contains("- test it\n"));
        assert!(body.starts_with("Hi,\n"));
        assert!(body.ends_with("Best,\n"));
    }

    #[test]
    fn caps_bullets_at_ten() {
        let bullets: Vec<String> = (0..15).map(|i| format!("b{i}")).collect();
        let out = DraftEmailTool
            .run(&args(
                json!({"to": "a@b.com", "subject": "Hi", "bullet_points": bullets}),
            ))
            .unwrap();
        let body = out["body"].as_str().unwrap();
        assert_eq!(body.matches("- ").count(), 10);
    }
}
