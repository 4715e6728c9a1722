//! SQLite-backed run store.
//!
//! One `runs` table, one row per run; a continuation pass replaces the
//! row under the same run id (`INSERT OR REPLACE`). JSON columns hold the
//! audit steps, the proposed plan, and the context.
//!
//! rusqlite is synchronous; calls are bridged onto the blocking pool via
//! `spawn_blocking` with the connection behind a mutex. Access per run is
//! already serialized by the caller, so a single shared connection is
//! enough.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use relay_application::{RunStorePort, StoreError};
use relay_domain::{Context, RunDraft, RunId, RunRecord, RunStatus, RunSummary, Step, StoredRun, ToolCall};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS runs (
  run_id TEXT PRIMARY KEY,
  created_at INTEGER,
  user_goal TEXT,
  status TEXT,
  final_answer TEXT,
  steps_json TEXT,
  proposed_plan_json TEXT,
  context_json TEXT
)";

fn backend(error: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(error.to_string())
}

fn corrupt(error: impl std::fmt::Display) -> StoreError {
    StoreError::Corrupt(error.to_string())
}

/// Run store over a single SQLite database file.
#[derive(Clone)]
pub struct SqliteRunStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRunStore {
    /// Open (or create) the database at `path` and ensure the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(backend)?;
            }
        }
        Self::init(Connection::open(path).map_err(backend)?)
    }

    /// In-memory store, used by tests.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory().map_err(backend)?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(SCHEMA, []).map_err(backend)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Backend("connection lock poisoned".to_string()))?;
            op(&guard)
        })
        .await
        .map_err(backend)?
    }
}

fn parse_status(raw: &str) -> Result<RunStatus, StoreError> {
    RunStatus::parse(raw).ok_or_else(|| corrupt(format!("unexpected run status: {raw}")))
}

fn parse_json<T: serde::de::DeserializeOwned>(raw: Option<String>) -> Result<Option<T>, StoreError> {
    raw.map(|s| serde_json::from_str(&s).map_err(corrupt)).transpose()
}

#[async_trait]
impl RunStorePort for SqliteRunStore {
    async fn save(&self, draft: &RunDraft) -> Result<(), StoreError> {
        let draft = draft.clone();
        debug!(run_id = %draft.run_id, status = %draft.status, "saving run");

        let steps_json = serde_json::to_string(&draft.steps).map_err(backend)?;
        let plan_json = draft
            .proposed_plan
            .as_ref()
            .map(|p| serde_json::to_string(p))
            .transpose()
            .map_err(backend)?;
        let context_json = draft
            .context
            .as_ref()
            .map(|c| serde_json::to_string(c))
            .transpose()
            .map_err(backend)?;

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO runs VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    draft.run_id.as_str(),
                    Utc::now().timestamp(),
                    draft.user_goal,
                    draft.status.as_str(),
                    draft.final_answer,
                    steps_json,
                    plan_json,
                    context_json,
                ],
            )
            .map_err(backend)?;
            Ok(())
        })
        .await
    }

    async fn load_for_continuation(
        &self,
        run_id: &RunId,
    ) -> Result<Option<StoredRun>, StoreError> {
        let run_id = run_id.clone();
        self.with_conn(move |conn| {
            let row = conn
                .query_row(
                    "SELECT run_id, user_goal, status, proposed_plan_json, context_json
                     FROM runs WHERE run_id = ?1",
                    params![run_id.as_str()],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, Option<String>>(3)?,
                            row.get::<_, Option<String>>(4)?,
                        ))
                    },
                )
                .optional()
                .map_err(backend)?;

            let Some((run_id, user_goal, status, plan_json, context_json)) = row else {
                return Ok(None);
            };

            Ok(Some(StoredRun {
                run_id: RunId::new(run_id),
                user_goal,
                status: parse_status(&status)?,
                proposed_plan: parse_json::<Vec<ToolCall>>(plan_json)?,
                context: parse_json::<Context>(context_json)?,
            }))
        })
        .await
    }

    async fn list(&self, limit: usize) -> Result<Vec<RunSummary>, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT run_id, created_at, user_goal, status, final_answer
                     FROM runs ORDER BY created_at DESC, rowid DESC LIMIT ?1",
                )
                .map_err(backend)?;

            let rows = stmt
                .query_map(params![limit as i64], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                })
                .map_err(backend)?;

            let mut out = Vec::new();
            for row in rows {
                let (run_id, created_at, user_goal, status, final_answer) =
                    row.map_err(backend)?;
                out.push(RunSummary {
                    run_id: RunId::new(run_id),
                    created_at,
                    user_goal,
                    status: parse_status(&status)?,
                    final_answer,
                });
            }
            Ok(out)
        })
        .await
    }

    async fn read(&self, run_id: &RunId) -> Result<Option<RunRecord>, StoreError> {
        let run_id = run_id.clone();
        self.with_conn(move |conn| {
            let row = conn
                .query_row(
                    "SELECT run_id, created_at, user_goal, status, final_answer,
                            steps_json, proposed_plan_json, context_json
                     FROM runs WHERE run_id = ?1",
                    params![run_id.as_str()],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, i64>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, String>(3)?,
                            row.get::<_, String>(4)?,
                            row.get::<_, Option<String>>(5)?,
                            row.get::<_, Option<String>>(6)?,
                            row.get::<_, Option<String>>(7)?,
                        ))
                    },
                )
                .optional()
                .map_err(backend)?;

            let Some((run_id, created_at, user_goal, status, final_answer, steps, plan, context)) =
                row
            else {
                return Ok(None);
            };

            Ok(Some(RunRecord {
                run_id: RunId::new(run_id),
                created_at,
                user_goal,
                status: parse_status(&status)?,
                final_answer,
                steps: parse_json::<Vec<Step>>(steps)?.unwrap_or_default(),
                proposed_plan: parse_json::<Vec<ToolCall>>(plan)?,
                context: parse_json::<Context>(context)?,
            }))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paused_draft(run_id: &str) -> RunDraft {
        RunDraft {
            run_id: RunId::new(run_id),
            user_goal: "email the team".to_string(),
            status: RunStatus::NeedsInput,
            final_answer: relay_domain::NEEDS_INPUT_MESSAGE.to_string(),
            steps: vec![Step::new(
                "Validating tool args: draft_email",
                Some(ToolCall::new("draft_email").with_arg("to", "a@b.com")),
            )],
            proposed_plan: Some(vec![ToolCall::new("draft_email").with_arg("to", "a@b.com")]),
            context: Some(json!({"text": "notes"}).as_object().cloned().unwrap()),
        }
    }

    #[tokio::test]
    async fn round_trips_a_paused_run() {
        let store = SqliteRunStore::in_memory().unwrap();
        store.save(&paused_draft("run-1")).await.unwrap();

        let stored = store
            .load_for_continuation(&RunId::new("run-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, RunStatus::NeedsInput);
        assert_eq!(stored.proposed_plan.unwrap()[0].name, "draft_email");
        assert_eq!(stored.context.unwrap()["text"], "notes");

        let record = store.read(&RunId::new("run-1")).await.unwrap().unwrap();
        assert_eq!(record.steps.len(), 1);
        assert_eq!(record.final_answer, relay_domain::NEEDS_INPUT_MESSAGE);
    }

    #[tokio::test]
    async fn save_replaces_the_record_under_the_same_id() {
        let store = SqliteRunStore::in_memory().unwrap();
        store.save(&paused_draft("run-1")).await.unwrap();

        let mut finished = paused_draft("run-1");
        finished.status = RunStatus::Ok;
        finished.final_answer = "Done.".to_string();
        finished.proposed_plan = None;
        store.save(&finished).await.unwrap();

        let runs = store.list(50).await.unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].status, RunStatus::Ok);
        assert_eq!(runs[0].final_answer, "Done.");

        let stored = store
            .load_for_continuation(&RunId::new("run-1"))
            .await
            .unwrap()
            .unwrap();
        assert!(stored.proposed_plan.is_none());
    }

    #[tokio::test]
    async fn list_returns_newest_first_and_respects_limit() {
        let store = SqliteRunStore::in_memory().unwrap();
        for i in 0..3 {
            store.save(&paused_draft(&format!("run-{i}"))).await.unwrap();
        }

        let runs = store.list(2).await.unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].run_id, RunId::new("run-2"));
        assert_eq!(runs[1].run_id, RunId::new("run-1"));
    }

    #[tokio::test]
    async fn missing_run_reads_as_none() {
        let store = SqliteRunStore::in_memory().unwrap();
        assert!(store.read(&RunId::new("nope")).await.unwrap().is_none());
        assert!(
            store
                .load_for_continuation(&RunId::new("nope"))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn open_creates_the_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("runs.db");
        let store = SqliteRunStore::open(&path).unwrap();
        store.save(&paused_draft("run-1")).await.unwrap();
        assert!(path.exists());
    }
}
