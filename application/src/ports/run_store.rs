//! Run Store port
//!
//! Defines the persistence interface for run history. The core writes one
//! record per execution pass (a continuation replaces the record under
//! the same run id) and reads back the stored plan/context pair to
//! reconstruct inputs for continuation.

use async_trait::async_trait;
use relay_domain::{RunDraft, RunId, RunRecord, RunSummary, StoredRun};
use thiserror::Error;

/// Errors raised by run store adapters.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Stored run is corrupt: {0}")]
    Corrupt(String),
}

/// Port for run persistence
#[async_trait]
pub trait RunStorePort: Send + Sync {
    /// Insert or replace the record for `draft.run_id`.
    async fn save(&self, draft: &RunDraft) -> Result<(), StoreError>;

    /// Read the slice of a run needed to continue it.
    async fn load_for_continuation(&self, run_id: &RunId)
    -> Result<Option<StoredRun>, StoreError>;

    /// List recent runs, newest first.
    async fn list(&self, limit: usize) -> Result<Vec<RunSummary>, StoreError>;

    /// Read a full stored record.
    async fn read(&self, run_id: &RunId) -> Result<Option<RunRecord>, StoreError>;
}
