//! Job lifecycle state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a job.
///
/// Transitions:
/// - Idle -> Enqueued -> Running -> Finished
/// - Idle -> Enqueued -> Running -> Failed
/// - Finished | Failed -> Enqueued (re-run)
///
/// A single enum replaces the four independent flags of the persisted
/// record, so contradictory combinations cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    #[default]
    Idle,
    Enqueued,
    Running,
    Finished,
    Failed,
}

/// The four flags of the persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateFlags {
    pub finished: bool,
    pub enqueued: bool,
    pub failed: bool,
    pub running: bool,
}

impl JobState {
    pub fn is_enqueued(self) -> bool {
        self == JobState::Enqueued
    }

    pub fn is_running(self) -> bool {
        self == JobState::Running
    }

    /// Failed counts as finished.
    pub fn is_finished(self) -> bool {
        matches!(self, JobState::Finished | JobState::Failed)
    }

    pub fn is_failed(self) -> bool {
        self == JobState::Failed
    }

    pub fn is_succeeded(self) -> bool {
        self == JobState::Finished
    }

    pub fn flags(self) -> StateFlags {
        StateFlags {
            finished: self.is_finished(),
            enqueued: self.is_enqueued(),
            failed: self.is_failed(),
            running: self.is_running(),
        }
    }

    /// Decode persisted flags.
    ///
    /// Flag based writers re-enqueue and restart a finished job without
    /// clearing `finished`, so `finished` alongside `enqueued` reads as
    /// `Enqueued` and `finished` alongside `running` reads as `Running`.
    pub fn from_flags(flags: StateFlags) -> Result<Self, &'static str> {
        let StateFlags {
            finished,
            enqueued,
            failed,
            running,
        } = flags;

        if running && enqueued {
            return Err("running and enqueued are mutually exclusive");
        }
        if running && failed {
            return Err("a running job cannot be failed");
        }
        if failed && !finished {
            return Err("failed implies finished");
        }

        Ok(match (running, enqueued, failed, finished) {
            (true, _, _, _) => JobState::Running,
            (_, true, _, _) => JobState::Enqueued,
            (_, _, true, _) => JobState::Failed,
            (_, _, _, true) => JobState::Finished,
            _ => JobState::Idle,
        })
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobState::Idle => "idle",
            JobState::Enqueued => "enqueued",
            JobState::Running => "running",
            JobState::Finished => "finished",
            JobState::Failed => "failed",
        };
        f.write_str(s)
    }
}
