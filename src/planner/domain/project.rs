//! The singleton current-project record.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Fixed storage key for the singleton project record.
pub const PROJECT_KEY: &str = "current";

/// The current project: a single mutable string with no history,
/// overwritten wholesale on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    name: String,
    updated: DateTime<Utc>,
}

impl Project {
    /// Creates a project record stamped with the current clock time.
    #[must_use]
    pub fn new(name: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            name: name.into(),
            updated: clock.utc(),
        }
    }

    /// Reconstructs a project record from persisted storage.
    #[must_use]
    pub const fn from_persisted(name: String, updated: DateTime<Utc>) -> Self {
        Self { name, updated }
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the last-save timestamp.
    #[must_use]
    pub const fn updated(&self) -> DateTime<Utc> {
        self.updated
    }
}
