//! Job: a named node of a workflow and its lifecycle.

use chrono::{DateTime, Timelike, Utc};
use tracing::{debug, info_span};

use crate::ports::{Clock, JobGraph};

use super::errors::JobError;
use super::ids::Jid;
use super::job_class::JobClass;
use super::logger::JobLogger;
use super::state::JobState;

/// A single schedulable unit.
///
/// Edges to other jobs are stored as names and resolved through a
/// [`JobGraph`]. Transition methods are unconditional: callers only start a
/// job after [`Job::can_be_started`] returned `true`, and only finish or fail
/// a running job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    name: String,
    klass: JobClass,
    state: JobState,
    incoming: Vec<String>,
    outgoing: Vec<String>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    failed_at: Option<DateTime<Utc>>,
    jid: Option<Jid>,
}

impl Job {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            klass: JobClass::default(),
            state: JobState::Idle,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            started_at: None,
            finished_at: None,
            failed_at: None,
            jid: None,
        }
    }

    pub fn with_class(mut self, klass: impl Into<JobClass>) -> Self {
        self.klass = klass.into();
        self
    }

    /// Predecessors: jobs that must succeed before this one may start.
    pub fn with_incoming<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.incoming = names.into_iter().map(Into::into).collect();
        self
    }

    /// Successors. Not consulted by resolution.
    pub fn with_outgoing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outgoing = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_jid(mut self, jid: Jid) -> Self {
        self.jid = Some(jid);
        self
    }

    /// Rebuild a job exactly as persisted. Used by record rehydration.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        name: String,
        klass: JobClass,
        state: JobState,
        incoming: Vec<String>,
        outgoing: Vec<String>,
        started_at: Option<DateTime<Utc>>,
        finished_at: Option<DateTime<Utc>>,
        failed_at: Option<DateTime<Utc>>,
        jid: Option<Jid>,
    ) -> Self {
        Self {
            name,
            klass,
            state,
            incoming,
            outgoing,
            started_at,
            finished_at,
            failed_at,
            jid,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn klass(&self) -> &JobClass {
        &self.klass
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn incoming(&self) -> &[String] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[String] {
        &self.outgoing
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn failed_at(&self) -> Option<DateTime<Utc>> {
        self.failed_at
    }

    pub fn jid(&self) -> Option<Jid> {
        self.jid
    }

    pub fn set_jid(&mut self, jid: Option<Jid>) {
        self.jid = jid;
    }

    // ---- transitions ----

    /// Queue the job, from any state. Clears the outcome of a previous run.
    pub fn enqueue(&mut self) {
        self.state = JobState::Enqueued;
        self.started_at = None;
        self.finished_at = None;
        self.failed_at = None;
        debug!(job = %self.name, "enqueued");
    }

    pub fn start<C: Clock + ?Sized>(&mut self, clock: &C) {
        self.state = JobState::Running;
        self.started_at = Some(stamp(clock));
        self.finished_at = None;
        self.failed_at = None;
        debug!(job = %self.name, "started");
    }

    pub fn finish<C: Clock + ?Sized>(&mut self, clock: &C) {
        self.state = JobState::Finished;
        self.finished_at = Some(stamp(clock));
        self.failed_at = None;
        debug!(job = %self.name, "finished");
    }

    pub fn fail<C: Clock + ?Sized>(&mut self, clock: &C) {
        let now = stamp(clock);
        self.state = JobState::Failed;
        self.finished_at = Some(now);
        self.failed_at = Some(now);
        debug!(job = %self.name, "failed");
    }

    // ---- queries ----

    pub fn is_enqueued(&self) -> bool {
        self.state.is_enqueued()
    }

    /// True for both successful and failed completion.
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_failed(&self) -> bool {
        self.state.is_failed()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_succeeded(&self) -> bool {
        self.state.is_succeeded()
    }

    /// Admission gate for starting the job: it must be idle and every
    /// transitive predecessor must have succeeded.
    ///
    /// Resolution errors only surface for idle jobs; a job in any other
    /// state answers `false` without touching the graph.
    pub fn can_be_started<G: JobGraph + ?Sized>(&self, graph: &G) -> Result<bool, JobError> {
        if self.state != JobState::Idle {
            return Ok(false);
        }
        self.dependencies_satisfied(graph)
    }

    /// Logging capability, available only while the job runs.
    pub fn logger(&self) -> Result<JobLogger, JobError> {
        if !self.is_running() {
            return Err(JobError::InvalidState {
                job: self.name.clone(),
                state: self.state,
                reason: "cannot log when not running",
            });
        }
        let jid = self.jid.map(|j| j.to_string()).unwrap_or_default();
        Ok(JobLogger::new(info_span!(
            "job",
            name = %self.name,
            klass = %self.klass,
            jid = %jid
        )))
    }
}

/// Timestamps have second granularity.
fn stamp<C: Clock + ?Sized>(clock: &C) -> DateTime<Utc> {
    let now = clock.now();
    now.with_nanosecond(0).unwrap_or(now)
}
