//! JobStore port: persistence of job records.
//!
//! The store is the source of truth between process restarts. It keeps
//! records, not jobs, and decides the concrete encoding itself.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{JobRecord, WorkflowId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record for job '{job}' in {workflow_id} could not be encoded or decoded: {source}")]
    Codec {
        workflow_id: WorkflowId,
        job: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no job '{job}' stored for {workflow_id}")]
    NotFound { workflow_id: WorkflowId, job: String },
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert or overwrite the record of one job.
    async fn persist_job(&self, workflow_id: WorkflowId, record: &JobRecord)
    -> Result<(), StoreError>;

    async fn find_job(&self, workflow_id: WorkflowId, name: &str) -> Result<JobRecord, StoreError>;

    /// Every record stored for a workflow, ordered by job name.
    async fn load_jobs(&self, workflow_id: WorkflowId) -> Result<Vec<JobRecord>, StoreError>;
}
