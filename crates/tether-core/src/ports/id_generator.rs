//! IdGenerator port.
//!
//! Executors mint a `Jid` every time they hand a job to a worker; workflow
//! containers mint a `WorkflowId` once.

use crate::domain::ids::{Jid, WorkflowId};
use crate::ports::Clock;
use ulid::Ulid;

/// Generates ids usable across workers without coordination.
pub trait IdGenerator: Send + Sync {
    fn generate_jid(&self) -> Jid;

    fn generate_workflow_id(&self) -> WorkflowId;
}

/// ULID based generator. The timestamp part comes from the injected clock, so
/// a `FixedClock` makes the time component deterministic.
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_jid(&self) -> Jid {
        Jid::from(self.next_ulid())
    }

    fn generate_workflow_id(&self) -> WorkflowId {
        WorkflowId::from(self.next_ulid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn generates_unique_ids() {
        let id_gen = UlidGenerator::new(SystemClock);

        let a = id_gen.generate_jid();
        let b = id_gen.generate_jid();
        assert_ne!(a, b);
    }

    #[test]
    fn fixed_clock_pins_the_timestamp_part() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id_gen = UlidGenerator::new(FixedClock::new(fixed_time));

        let a = id_gen.generate_jid();
        let b = id_gen.generate_workflow_id();

        // random part differs, timestamp part does not
        assert_ne!(a.as_ulid(), b.as_ulid());
        assert_eq!(a.as_ulid().timestamp_ms(), fixed_time.timestamp_millis() as u64);
        assert_eq!(b.as_ulid().timestamp_ms(), fixed_time.timestamp_millis() as u64);
    }
}
