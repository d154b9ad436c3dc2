//! Bucket partitioning and display ordering of the full task set.

use super::{DayBucket, Task, TaskTime};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// The full task set partitioned into the three day buckets.
///
/// Every task with a known bucket appears in exactly one field; corrupt
/// records are excluded upstream by the adapters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedTasks {
    /// Tasks in the today bucket.
    pub today: Vec<Task>,
    /// Tasks in the tomorrow bucket.
    pub tomorrow: Vec<Task>,
    /// Tasks in the day-after-tomorrow bucket.
    pub after_tomorrow: Vec<Task>,
}

impl GroupedTasks {
    /// Partitions a flat task collection by bucket, preserving input order.
    #[must_use]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut grouped = Self::default();
        for task in tasks {
            match task.day() {
                DayBucket::Today => grouped.today.push(task),
                DayBucket::Tomorrow => grouped.tomorrow.push(task),
                DayBucket::AfterTomorrow => grouped.after_tomorrow.push(task),
            }
        }
        grouped
    }

    /// Sorts each bucket into display order.
    #[must_use]
    pub fn display_ordered(mut self) -> Self {
        sort_for_display(&mut self.today);
        sort_for_display(&mut self.tomorrow);
        sort_for_display(&mut self.after_tomorrow);
        self
    }

    /// Returns the total number of tasks across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.today.len() + self.tomorrow.len() + self.after_tomorrow.len()
    }

    /// Returns whether all buckets are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sorts tasks into display order: ascending by scheduled time, with
/// unscheduled tasks sorting as `00:00`, then by creation time as tie-break.
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| {
        (
            task.time().map_or(NaiveTime::MIN, TaskTime::as_naive_time),
            task.created(),
        )
    });
}

/// Authoritative planner state broadcast to observers after each mutation.
///
/// Serializes to the wire shape the UI surfaces consume: the current project
/// plus the three buckets in display order, camelCase field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerSnapshot {
    /// Current project name, empty when unset.
    pub current_project: String,
    /// Today's tasks in display order.
    pub today: Vec<Task>,
    /// Tomorrow's tasks in display order.
    pub tomorrow: Vec<Task>,
    /// Day-after-tomorrow's tasks in display order.
    pub after_tomorrow: Vec<Task>,
}

impl PlannerSnapshot {
    /// Builds a snapshot from the current project and a grouped partition,
    /// applying display ordering to each bucket.
    #[must_use]
    pub fn from_parts(current_project: String, grouped: GroupedTasks) -> Self {
        let ordered = grouped.display_ordered();
        Self {
            current_project,
            today: ordered.today,
            tomorrow: ordered.tomorrow,
            after_tomorrow: ordered.after_tomorrow,
        }
    }
}
