//! Dependency resolution options.

use serde::{Deserialize, Serialize};

/// Longest predecessor chain resolution accepts, counting the resolved job.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// How resolution reacts to a malformed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveStrategy {
    /// Every over-long chain, cycles included, fails with
    /// `DependencyDepthExceeded`.
    #[default]
    DepthBounded,

    /// A job revisited on the current path fails with `CycleDetected`
    /// before the depth limit is reached.
    CycleChecked,
}

/// Options used by `Job::dependencies`. Supplied by the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    pub max_depth: usize,
    pub strategy: ResolveStrategy,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strategy: ResolveStrategy::DepthBounded,
        }
    }
}

impl ResolveOptions {
    pub fn cycle_checked() -> Self {
        Self {
            strategy: ResolveStrategy::CycleChecked,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
