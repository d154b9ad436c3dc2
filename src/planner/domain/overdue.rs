//! Overdue classification for scheduled tasks.

use super::{DayBucket, Task, TaskTime};
use chrono::{DateTime, Days, Utc};

/// Computes the concrete instant a task in the given bucket is due,
/// relative to `now`'s calendar date.
///
/// The bucket contributes its calendar-day offset (0, 1, or 2 days), so a
/// tomorrow task scheduled at `09:00` is due tomorrow at `09:00`.
#[must_use]
pub fn due_instant(day: DayBucket, time: TaskTime, now: DateTime<Utc>) -> DateTime<Utc> {
    let date = now
        .date_naive()
        .checked_add_days(Days::new(day.offset_days()))
        .unwrap_or_else(|| now.date_naive());
    date.and_time(time.as_naive_time()).and_utc()
}

/// Returns whether a task is overdue at `now`.
///
/// Unscheduled and completed tasks are never overdue. Overdue is a
/// today-only concept: a scheduled task sitting in tomorrow or
/// day-after-tomorrow always has a future due instant by construction, so
/// only today tasks with `now` strictly past their due instant classify.
#[must_use]
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    if task.completed() {
        return false;
    }
    let Some(time) = task.time() else {
        return false;
    };
    if task.day() != DayBucket::Today {
        return false;
    }
    now > due_instant(task.day(), time, now)
}
