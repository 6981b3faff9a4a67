//! App - drives jobs of a workflow through their lifecycle.
//!
//! The worker combines the ports: admission through `Job::can_be_started`,
//! payload lookup through the `WorkRegistry`, timestamps through the `Clock`,
//! jids through the `IdGenerator`.

pub mod worker;

pub use self::worker::{JobReport, RunSummary, Worker, WorkerError};
