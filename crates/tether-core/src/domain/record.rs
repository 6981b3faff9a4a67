//! Persisted shape of a job.
//!
//! Flags and timestamps are stored the way workflow engines have always
//! stored them (four booleans, Unix seconds), so records written by other
//! producers load unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::errors::JobError;
use super::ids::Jid;
use super::job::Job;
use super::job_class::JobClass;
use super::state::{JobState, StateFlags};

/// Serializable record of a job. Everything except `name` is optional on
/// input; a missing key and an explicit `null` both read as the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub klass: JobClass,

    #[serde(default, deserialize_with = "null_as_default")]
    pub finished: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub enqueued: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub failed: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub incoming: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub outgoing: Vec<String>,

    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub finished_at: Option<DateTime<Utc>>,

    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub failed_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub running: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jid: Option<Jid>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl JobRecord {
    /// Record for a fresh idle job.
    pub fn new(name: impl Into<String>) -> Self {
        Job::new(name).to_record()
    }

    fn flags(&self) -> StateFlags {
        StateFlags {
            finished: self.finished,
            enqueued: self.enqueued,
            failed: self.failed,
            running: self.running,
        }
    }
}

impl Job {
    pub fn to_record(&self) -> JobRecord {
        let flags = self.state().flags();
        JobRecord {
            name: self.name().to_string(),
            klass: self.klass().clone(),
            finished: flags.finished,
            enqueued: flags.enqueued,
            failed: flags.failed,
            incoming: self.incoming().to_vec(),
            outgoing: self.outgoing().to_vec(),
            finished_at: self.finished_at(),
            started_at: self.started_at(),
            failed_at: self.failed_at(),
            running: flags.running,
            jid: self.jid(),
        }
    }

    /// Rehydrate a job.
    ///
    /// Fails with `InconsistentRecord` when the flags describe no reachable
    /// state (e.g. running and enqueued at once).
    pub fn from_record(record: JobRecord) -> Result<Job, JobError> {
        let state = JobState::from_flags(record.flags()).map_err(|reason| {
            JobError::InconsistentRecord {
                job: record.name.clone(),
                reason,
            }
        })?;

        Ok(Job::restore(
            record.name,
            record.klass,
            state,
            record.incoming,
            record.outgoing,
            record.started_at,
            record.finished_at,
            record.failed_at,
            record.jid,
        ))
    }
}

impl From<&Job> for JobRecord {
    fn from(job: &Job) -> Self {
        job.to_record()
    }
}

impl TryFrom<JobRecord> for Job {
    type Error = JobError;

    fn try_from(record: JobRecord) -> Result<Self, Self::Error> {
        Job::from_record(record)
    }
}
