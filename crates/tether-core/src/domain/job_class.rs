use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator naming the payload type of a job.
///
/// The core only carries it; the payload registry resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobClass(String);

impl JobClass {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobClass {
    fn default() -> Self {
        Self::new("Job")
    }
}

impl From<&str> for JobClass {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for JobClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
