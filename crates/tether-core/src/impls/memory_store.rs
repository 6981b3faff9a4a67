//! InMemoryJobStore: JSON encoded records held in process memory.
//!
//! For tests and single-process runs. Records are stored as JSON text so the
//! same encode/decode path as a real key-value backend is exercised.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{JobRecord, WorkflowId};
use crate::ports::{JobStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    records: Mutex<BTreeMap<(WorkflowId, String), String>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn decode(workflow_id: WorkflowId, job: &str, text: &str) -> Result<JobRecord, StoreError> {
    serde_json::from_str(text).map_err(|source| StoreError::Codec {
        workflow_id,
        job: job.to_string(),
        source,
    })
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn persist_job(
        &self,
        workflow_id: WorkflowId,
        record: &JobRecord,
    ) -> Result<(), StoreError> {
        let text = serde_json::to_string(record).map_err(|source| StoreError::Codec {
            workflow_id,
            job: record.name.clone(),
            source,
        })?;
        let mut records = self.records.lock().await;
        records.insert((workflow_id, record.name.clone()), text);
        debug!(workflow = %workflow_id, job = %record.name, "job persisted");
        Ok(())
    }

    async fn find_job(&self, workflow_id: WorkflowId, name: &str) -> Result<JobRecord, StoreError> {
        let records = self.records.lock().await;
        let text = records
            .get(&(workflow_id, name.to_string()))
            .ok_or_else(|| StoreError::NotFound {
                workflow_id,
                job: name.to_string(),
            })?;
        decode(workflow_id, name, text)
    }

    async fn load_jobs(&self, workflow_id: WorkflowId) -> Result<Vec<JobRecord>, StoreError> {
        let records = self.records.lock().await;
        records
            .iter()
            .filter(|((id, _), _)| *id == workflow_id)
            .map(|((_, name), text)| decode(workflow_id, name, text))
            .collect()
    }
}
