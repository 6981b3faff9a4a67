//! Per-job logging capability.

use tracing::Span;

/// Logger handed to a running job.
///
/// Every event is emitted inside a span carrying the job name, class and
/// jid, so log lines stay attributed to one execution.
#[derive(Debug, Clone)]
pub struct JobLogger {
    span: Span,
}

impl JobLogger {
    pub(crate) fn new(span: Span) -> Self {
        Self { span }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn debug(&self, message: &str) {
        self.span.in_scope(|| tracing::debug!("{message}"));
    }

    pub fn info(&self, message: &str) {
        self.span.in_scope(|| tracing::info!("{message}"));
    }

    pub fn warn(&self, message: &str) {
        self.span.in_scope(|| tracing::warn!("{message}"));
    }

    pub fn error(&self, message: &str) {
        self.span.in_scope(|| tracing::error!("{message}"));
    }
}
