//! Domain errors.

use thiserror::Error;

use super::state::JobState;

/// Errors raised by the job state machine and dependency resolution.
///
/// None of these are retried internally. A failed query leaves every job
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    /// Transitive resolution walked a predecessor chain longer than the
    /// configured ceiling. Usually means the graph contains a cycle.
    #[error("dependency chain of job '{job}' exceeds the depth limit of {limit}")]
    DependencyDepthExceeded { job: String, limit: usize },

    /// A referenced name has no job in the graph.
    #[error("job not found: {0}")]
    JobNotFound(String),

    /// Operation invoked outside its legal state window.
    #[error("job '{job}' is {state}: {reason}")]
    InvalidState {
        job: String,
        state: JobState,
        reason: &'static str,
    },

    /// Raised only by cycle-checked resolution. `path` starts and ends with
    /// the revisited job.
    #[error("dependency cycle detected: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    /// A record carries a flag combination no transition can produce.
    #[error("inconsistent record for job '{job}': {reason}")]
    InconsistentRecord { job: String, reason: &'static str },

    #[error("job name must not be empty")]
    EmptyName,

    #[error("duplicate job name: {0}")]
    DuplicateJob(String),
}
