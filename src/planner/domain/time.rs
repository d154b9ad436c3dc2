//! Validated wall-clock time-of-day scalar.

use super::PlannerDomainError;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-padded 24-hour `HH:MM` time a task is scheduled for.
///
/// Tasks without a `TaskTime` are unscheduled and never become overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTime {
    hour: u8,
    minute: u8,
}

impl TaskTime {
    /// Parses a validated `HH:MM` time.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerDomainError::InvalidTime`] unless the value is
    /// exactly two zero-padded digit pairs separated by a colon, with the
    /// hour below 24 and the minute below 60.
    pub fn new(value: &str) -> Result<Self, PlannerDomainError> {
        let invalid = || PlannerDomainError::InvalidTime(value.to_owned());
        let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
        // Digit check up front; integer parsing alone would accept a
        // leading sign.
        let digit_pair =
            |part: &str| part.len() == 2 && part.bytes().all(|byte| byte.is_ascii_digit());
        if !digit_pair(hours) || !digit_pair(minutes) {
            return Err(invalid());
        }
        let hour: u8 = hours.parse().map_err(|_| invalid())?;
        let minute: u8 = minutes.parse().map_err(|_| invalid())?;
        if hour >= 24 || minute >= 60 {
            return Err(invalid());
        }
        Ok(Self { hour, minute })
    }

    /// Returns the hour component (0-23).
    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// Returns the minute component (0-59).
    #[must_use]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// Returns this time as a [`NaiveTime`] with zero seconds.
    #[must_use]
    pub fn as_naive_time(self) -> NaiveTime {
        // Components are range-checked at construction; midnight is an
        // unreachable fallback.
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or_default()
    }
}

impl fmt::Display for TaskTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for TaskTime {
    type Error = PlannerDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<TaskTime> for String {
    fn from(time: TaskTime) -> Self {
        time.to_string()
    }
}
