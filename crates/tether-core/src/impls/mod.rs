//! Impls - in-process implementations of the ports.
//!
//! - **Workflow**: arena of jobs keyed by name, implements `JobGraph`
//! - **InMemoryJobStore**: JSON records in memory, implements `JobStore`
//!
//! Durable backends live outside this crate and implement the same ports.

pub mod memory_store;
pub mod workflow;

pub use self::memory_store::InMemoryJobStore;
pub use self::workflow::Workflow;
