//! The three fixed day buckets a task can occupy.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Day bucket a task is currently assigned to.
///
/// A task belongs to exactly one bucket at any time; the bucket changes only
/// through an explicit move or the rollover engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayBucket {
    /// The current calendar day.
    Today,
    /// The next calendar day.
    Tomorrow,
    /// Two calendar days from now.
    AfterTomorrow,
}

impl DayBucket {
    /// Returns the canonical storage representation.
    ///
    /// These strings are a stable persistence format; imported dumps written
    /// with them round-trip unchanged.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::AfterTomorrow => "afterTomorrow",
        }
    }

    /// Returns the calendar-day offset from today for this bucket.
    #[must_use]
    pub const fn offset_days(self) -> u64 {
        match self {
            Self::Today => 0,
            Self::Tomorrow => 1,
            Self::AfterTomorrow => 2,
        }
    }
}

impl TryFrom<&str> for DayBucket {
    type Error = ParseDayBucketError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "today" => Ok(Self::Today),
            "tomorrow" => Ok(Self::Tomorrow),
            "afterTomorrow" => Ok(Self::AfterTomorrow),
            _ => Err(ParseDayBucketError(value.to_owned())),
        }
    }
}

impl fmt::Display for DayBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing day buckets from persistence.
///
/// A stored record carrying a value outside the known enum is a corrupt
/// record; grouped reads exclude such rows silently.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown day bucket: {0}")]
pub struct ParseDayBucketError(pub String);
