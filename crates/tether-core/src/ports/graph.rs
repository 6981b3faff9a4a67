//! Graph accessor port.

use std::collections::{BTreeMap, HashMap};

use crate::config::ResolveOptions;
use crate::domain::{Job, JobError};

/// Name based lookup into the container that owns a set of jobs.
///
/// This is the only way one job reaches another. Jobs store names, never
/// references, so they serialize without fix-up.
pub trait JobGraph {
    /// Fails with `JobError::JobNotFound` when `name` is unknown.
    fn find_job(&self, name: &str) -> Result<&Job, JobError>;

    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions::default()
    }
}

impl<G: JobGraph + ?Sized> JobGraph for &G {
    fn find_job(&self, name: &str) -> Result<&Job, JobError> {
        (**self).find_job(name)
    }

    fn resolve_options(&self) -> ResolveOptions {
        (**self).resolve_options()
    }
}

impl JobGraph for HashMap<String, Job> {
    fn find_job(&self, name: &str) -> Result<&Job, JobError> {
        self.get(name)
            .ok_or_else(|| JobError::JobNotFound(name.to_string()))
    }
}

impl JobGraph for BTreeMap<String, Job> {
    fn find_job(&self, name: &str) -> Result<&Job, JobError> {
        self.get(name)
            .ok_or_else(|| JobError::JobNotFound(name.to_string()))
    }
}
