//! tether-core
//!
//! Job lifecycle and transitive dependency resolution for DAG workflows.
//!
//! # Modules
//! - **domain**: `Job`, its state machine, dependency resolution and the
//!   persisted `JobRecord`
//! - **ports**: interfaces the core consumes (`JobGraph`, `Clock`,
//!   `IdGenerator`, `JobStore`)
//! - **impls**: in-memory `Workflow` graph and `InMemoryJobStore`
//! - **typed**: job payloads (`Work`) and their registry keyed by job class
//! - **app**: `Worker`, which admits, runs and transitions jobs
//! - **config**: resolution options (depth limit, cycle checking)

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod typed;

pub use config::{ResolveOptions, ResolveStrategy};
pub use domain::{Job, JobClass, JobError, JobLogger, JobRecord, JobState, Jid, WorkflowId};
pub use ports::JobGraph;
