//! Task aggregate root and related planner types.

use super::{DayBucket, PlannerDomainError, TaskId, TaskTime};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty user-supplied task content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskText(String);

impl TaskText {
    /// Creates validated task text.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerDomainError::EmptyTaskText`] when the value is empty
    /// or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, PlannerDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(PlannerDomainError::EmptyTaskText);
        }
        Ok(Self(raw))
    }

    /// Returns the text as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    day: DayBucket,
    text: TaskText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<TaskTime>,
    completed: bool,
    created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted day bucket.
    pub day: DayBucket,
    /// Persisted task text.
    pub text: TaskText,
    /// Persisted time-of-day, if scheduled.
    pub time: Option<TaskTime>,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created: DateTime<Utc>,
    /// Persisted latest-mutation timestamp, absent until first update.
    pub updated: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new incomplete task in the given bucket.
    #[must_use]
    pub fn new(day: DayBucket, text: TaskText, time: Option<TaskTime>, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            day,
            text,
            time,
            completed: false,
            created: clock.utc(),
            updated: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            day: data.day,
            text: data.text,
            time: data.time,
            completed: data.completed,
            created: data.created,
            updated: data.updated,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the day bucket the task currently occupies.
    #[must_use]
    pub const fn day(&self) -> DayBucket {
        self.day
    }

    /// Returns the task text.
    #[must_use]
    pub const fn text(&self) -> &TaskText {
        &self.text
    }

    /// Returns the scheduled time-of-day, if any.
    #[must_use]
    pub const fn time(&self) -> Option<TaskTime> {
        self.time
    }

    /// Returns whether the task has been completed.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns the latest-mutation timestamp, absent until the first update.
    #[must_use]
    pub const fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated
    }

    /// Merges the supplied patch fields into this task and stamps `updated`.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerDomainError`] when a patched text or time value fails
    /// validation; the task is left unchanged in that case.
    pub fn apply(&mut self, patch: TaskPatch, clock: &impl Clock) -> Result<(), PlannerDomainError> {
        let text = patch.text.map(TaskText::new).transpose()?;
        let time = match patch.time {
            Some(Some(raw)) => Some(Some(TaskTime::new(&raw)?)),
            Some(None) => Some(None),
            None => None,
        };

        if let Some(day) = patch.day {
            self.day = day;
        }
        if let Some(value) = text {
            self.text = value;
        }
        if let Some(value) = time {
            self.time = value;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.touch(clock);
        Ok(())
    }

    /// Reassigns the task to another bucket, preserving completion and time.
    pub fn reassign(&mut self, day: DayBucket, clock: &impl Clock) {
        self.day = day;
        self.touch(clock);
    }

    /// Updates the `updated` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated = Some(clock.utc());
    }
}

/// Partial-field merge applied to an existing task.
///
/// Unset fields leave the task untouched; the nested time option
/// distinguishes "leave as is" from "clear the schedule".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    day: Option<DayBucket>,
    text: Option<String>,
    time: Option<Option<String>>,
    completed: Option<bool>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the task to the given bucket.
    #[must_use]
    pub const fn with_day(mut self, day: DayBucket) -> Self {
        self.day = Some(day);
        self
    }

    /// Replaces the task text; validated on apply.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Schedules the task at the given `HH:MM` time; validated on apply.
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(Some(time.into()));
        self
    }

    /// Removes any scheduled time, leaving the task unscheduled.
    #[must_use]
    pub fn clearing_time(mut self) -> Self {
        self.time = Some(None);
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}
