//! Work trait - the payload a job runs.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{JobClass, JobLogger};

/// Failure reported by a payload. The job is marked failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct WorkError(pub String);

impl WorkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// What a payload sees of the job it runs for.
#[derive(Debug, Clone)]
pub struct WorkContext {
    pub name: String,
    pub klass: JobClass,
    pub logger: JobLogger,
}

/// Payload attached to a job class.
///
/// `before_work` and `after_work` are optional hooks; an error from any of
/// the three steps fails the job.
///
/// ```ignore
/// struct Fetch;
///
/// #[async_trait]
/// impl Work for Fetch {
///     async fn perform(&self, ctx: &WorkContext) -> Result<(), WorkError> {
///         ctx.logger.info("fetching");
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Work: Send + Sync {
    async fn before_work(&self, _ctx: &WorkContext) -> Result<(), WorkError> {
        Ok(())
    }

    async fn perform(&self, ctx: &WorkContext) -> Result<(), WorkError>;

    async fn after_work(&self, _ctx: &WorkContext) -> Result<(), WorkError> {
        Ok(())
    }
}

/// Payload that does nothing and succeeds.
pub struct NoopWork;

#[async_trait]
impl Work for NoopWork {
    async fn perform(&self, ctx: &WorkContext) -> Result<(), WorkError> {
        ctx.logger.debug("noop");
        Ok(())
    }
}
