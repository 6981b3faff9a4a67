//! In-memory workflow: owns every job of one run, keyed by name.
//!
//! Jobs never own each other; the workflow is the arena and answers
//! name lookups for dependency resolution.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::ResolveOptions;
use crate::domain::{Job, JobError, JobRecord, WorkflowId};
use crate::ports::JobGraph;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
    id: WorkflowId,
    jobs: BTreeMap<String, Job>,
    options: ResolveOptions,
}

impl Workflow {
    pub fn new(id: WorkflowId) -> Self {
        Self {
            id,
            jobs: BTreeMap::new(),
            options: ResolveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn id(&self) -> WorkflowId {
        self.id
    }

    /// Add a job. Names must be non-empty and unique.
    pub fn insert(&mut self, job: Job) -> Result<(), JobError> {
        if job.name().is_empty() {
            return Err(JobError::EmptyName);
        }
        if self.jobs.contains_key(job.name()) {
            return Err(JobError::DuplicateJob(job.name().to_string()));
        }
        debug!(workflow = %self.id, job = %job.name(), "job added");
        self.jobs.insert(job.name().to_string(), job);
        Ok(())
    }

    pub fn find_job_mut(&mut self, name: &str) -> Result<&mut Job, JobError> {
        self.jobs
            .get_mut(name)
            .ok_or_else(|| JobError::JobNotFound(name.to_string()))
    }

    /// Jobs ordered by name.
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Jobs without predecessors.
    pub fn initial_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values().filter(|job| job.incoming().is_empty())
    }

    /// Every job finished, successfully or not.
    pub fn is_finished(&self) -> bool {
        self.jobs.values().all(Job::is_finished)
    }

    pub fn is_failed(&self) -> bool {
        self.jobs.values().any(Job::is_failed)
    }

    pub fn is_running(&self) -> bool {
        self.jobs.values().any(|job| job.is_running() || job.is_enqueued())
    }

    pub fn to_records(&self) -> Vec<JobRecord> {
        self.jobs.values().map(Job::to_record).collect()
    }

    /// Rebuild a workflow from persisted records.
    pub fn from_records<I>(id: WorkflowId, records: I) -> Result<Self, JobError>
    where
        I: IntoIterator<Item = JobRecord>,
    {
        let mut workflow = Self::new(id);
        for record in records {
            workflow.insert(Job::from_record(record)?)?;
        }
        Ok(workflow)
    }
}

impl JobGraph for Workflow {
    fn find_job(&self, name: &str) -> Result<&Job, JobError> {
        self.jobs
            .get(name)
            .ok_or_else(|| JobError::JobNotFound(name.to_string()))
    }

    fn resolve_options(&self) -> ResolveOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolveStrategy;
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};
    use ulid::Ulid;

    fn workflow() -> Workflow {
        Workflow::new(WorkflowId::from_ulid(Ulid::new()))
    }

    #[test]
    fn rejects_empty_and_duplicate_names() {
        let mut wf = workflow();

        assert_eq!(wf.insert(Job::new("")), Err(JobError::EmptyName));
        assert!(wf.insert(Job::new("a")).is_ok());
        assert_eq!(
            wf.insert(Job::new("a")),
            Err(JobError::DuplicateJob("a".to_string()))
        );
        assert_eq!(wf.len(), 1);
    }

    #[test]
    fn lookup_of_unknown_name_fails() {
        let wf = workflow();
        assert_eq!(
            wf.find_job("nope").unwrap_err(),
            JobError::JobNotFound("nope".to_string())
        );
    }

    #[test]
    fn initial_jobs_have_no_predecessors() {
        let mut wf = workflow();
        wf.insert(Job::new("a").with_outgoing(["b"])).unwrap();
        wf.insert(Job::new("b").with_incoming(["a"])).unwrap();
        wf.insert(Job::new("c")).unwrap();

        let names: Vec<&str> = wf.initial_jobs().map(Job::name).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn options_reach_resolution() {
        let mut wf = workflow().with_options(ResolveOptions::cycle_checked());
        wf.insert(Job::new("a").with_incoming(["b"])).unwrap();
        wf.insert(Job::new("b").with_incoming(["a"])).unwrap();

        assert_eq!(wf.resolve_options().strategy, ResolveStrategy::CycleChecked);
        let a = wf.find_job("a").unwrap();
        assert!(matches!(
            a.dependencies(&wf),
            Err(JobError::CycleDetected { .. })
        ));
    }

    #[test]
    fn records_restore_an_equal_workflow() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 2, 2, 2, 2, 2).unwrap());
        let mut wf = workflow();
        wf.insert(Job::new("a").with_outgoing(["b"])).unwrap();
        wf.insert(Job::new("b").with_incoming(["a"])).unwrap();
        {
            let a = wf.find_job_mut("a").unwrap();
            a.enqueue();
            a.start(&clock);
            a.finish(&clock);
        }

        let restored = Workflow::from_records(wf.id(), wf.to_records()).unwrap();

        assert_eq!(restored, wf);
        assert!(!restored.is_finished());
        assert!(!restored.is_failed());
    }
}
