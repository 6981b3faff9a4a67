//! Domain model: job, lifecycle state, dependency resolution, records.

pub mod dependency;
pub mod errors;
pub mod ids;
pub mod job;
pub mod job_class;
pub mod logger;
pub mod record;
pub mod state;

pub use errors::JobError;
pub use ids::{Jid, WorkflowId};
pub use job::Job;
pub use job_class::JobClass;
pub use logger::JobLogger;
pub use record::JobRecord;
pub use state::{JobState, StateFlags};
