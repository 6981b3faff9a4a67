//! Worker: admission, execution and transition of jobs.
//!
//! Every check-then-act step (readiness check followed by `enqueue`) runs
//! under a single `&mut Workflow` borrow, so no other caller can interleave
//! between the two.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{JobError, JobState};
use crate::impls::Workflow;
use crate::ports::{Clock, IdGenerator, JobGraph};
use crate::typed::{RegistryError, Work, WorkContext, WorkError, WorkRegistry};

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result of performing one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub name: String,
    pub state: JobState,
    /// Successors that became startable and were enqueued.
    pub enqueued: Vec<String>,
}

/// Result of driving a workflow until no job is enqueued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub performed: usize,
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
    /// Jobs left idle because a predecessor never succeeded.
    pub blocked: Vec<String>,
}

pub struct Worker<C, I> {
    registry: Arc<WorkRegistry>,
    clock: C,
    ids: I,
}

impl<C: Clock, I: IdGenerator> Worker<C, I> {
    pub fn new(registry: Arc<WorkRegistry>, clock: C, ids: I) -> Self {
        Self {
            registry,
            clock,
            ids,
        }
    }

    /// Enqueue every idle job whose predecessors all succeeded.
    ///
    /// Returns the enqueued names in workflow order.
    pub fn enqueue_ready(&self, workflow: &mut Workflow) -> Result<Vec<String>, JobError> {
        let mut ready = Vec::new();
        for job in workflow.jobs() {
            if job.can_be_started(&*workflow)? {
                ready.push(job.name().to_string());
            }
        }
        for name in &ready {
            self.enqueue(workflow, name)?;
        }
        Ok(ready)
    }

    /// Run one enqueued job: start it, run its payload, finish or fail it,
    /// then enqueue successors that became startable.
    ///
    /// A job that is not enqueued, or whose class has no registered work, is
    /// left untouched and an error is returned. Once the job has run, a
    /// successor that is missing or cannot be resolved is logged and skipped;
    /// the report is still returned.
    pub async fn perform_job(
        &self,
        workflow: &mut Workflow,
        name: &str,
    ) -> Result<JobReport, WorkerError> {
        let (klass, outgoing) = {
            let job = workflow.find_job(name)?;
            if !job.is_enqueued() {
                return Err(JobError::InvalidState {
                    job: name.to_string(),
                    state: job.state(),
                    reason: "only enqueued jobs can be performed",
                }
                .into());
            }
            (job.klass().clone(), job.outgoing().to_vec())
        };
        let work = self.registry.get(&klass)?;

        let ctx = {
            let job = workflow.find_job_mut(name)?;
            job.start(&self.clock);
            WorkContext {
                name: name.to_string(),
                klass,
                logger: job.logger()?,
            }
        };
        info!(workflow = %workflow.id(), job = %name, "job started");

        let result = run_work(work.as_ref(), &ctx).await;

        let job = workflow.find_job_mut(name)?;
        match result {
            Ok(()) => {
                job.finish(&self.clock);
                info!(job = %name, "job finished");
            }
            Err(err) => {
                ctx.logger.error(&err.to_string());
                job.fail(&self.clock);
                warn!(job = %name, error = %err, "job failed");
            }
        }
        let state = job.state();

        let mut enqueued = Vec::new();
        if state.is_succeeded() {
            for next in &outgoing {
                let ready = {
                    let graph: &Workflow = workflow;
                    graph
                        .find_job(next)
                        .and_then(|successor| successor.can_be_started(graph))
                };
                match ready {
                    Ok(true) => {
                        self.enqueue(workflow, next)?;
                        enqueued.push(next.clone());
                    }
                    Ok(false) => {}
                    Err(err) => {
                        warn!(job = %name, successor = %next, error = %err, "successor skipped");
                    }
                }
            }
        }

        Ok(JobReport {
            name: name.to_string(),
            state,
            enqueued,
        })
    }

    /// Drive the workflow sequentially until nothing is enqueued.
    pub async fn run_to_completion(
        &self,
        workflow: &mut Workflow,
    ) -> Result<RunSummary, WorkerError> {
        let mut summary = RunSummary::default();
        self.enqueue_ready(workflow)?;

        while let Some(name) = next_enqueued(workflow) {
            let report = self.perform_job(workflow, &name).await?;
            summary.performed += 1;
            match report.state {
                JobState::Finished => summary.succeeded.push(report.name),
                JobState::Failed => summary.failed.push(report.name),
                _ => {}
            }
        }

        summary.blocked = workflow
            .jobs()
            .filter(|job| job.state() == JobState::Idle)
            .map(|job| job.name().to_string())
            .collect();
        Ok(summary)
    }

    fn enqueue(&self, workflow: &mut Workflow, name: &str) -> Result<(), JobError> {
        let job = workflow.find_job_mut(name)?;
        job.enqueue();
        job.set_jid(Some(self.ids.generate_jid()));
        Ok(())
    }
}

fn next_enqueued(workflow: &Workflow) -> Option<String> {
    workflow
        .jobs()
        .find(|job| job.is_enqueued())
        .map(|job| job.name().to_string())
}

async fn run_work(work: &dyn Work, ctx: &WorkContext) -> Result<(), WorkError> {
    work.before_work(ctx).await?;
    work.perform(ctx).await?;
    work.after_work(ctx).await
}
