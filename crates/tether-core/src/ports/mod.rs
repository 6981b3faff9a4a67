//! Ports: the narrow interfaces the core consumes.
//!
//! - `JobGraph`: name based lookup of jobs, the only link between jobs
//! - `Clock`: transition timestamps
//! - `IdGenerator`: jid / workflow id minting
//! - `JobStore`: persistence of job records

pub mod clock;
pub mod graph;
pub mod id_generator;
pub mod job_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::graph::JobGraph;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::job_store::{JobStore, StoreError};
