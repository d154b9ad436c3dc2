//! Overdue classifier tests.

use super::support::{FixedClock, instant};
use crate::planner::domain::{DayBucket, Task, TaskPatch, TaskText, TaskTime, due_instant, is_overdue};
use rstest::rstest;

fn scheduled_task(day: DayBucket, time: &str) -> Task {
    let clock = FixedClock(instant(2025, 6, 1, 0, 0, 0));
    let text = TaskText::new("scheduled").expect("valid text");
    let parsed = TaskTime::new(time).expect("valid time");
    Task::new(day, text, Some(parsed), &clock)
}

#[rstest]
fn unscheduled_task_is_never_overdue() {
    let clock = FixedClock(instant(2025, 6, 1, 0, 0, 0));
    let text = TaskText::new("unscheduled").expect("valid text");
    let task = Task::new(DayBucket::Today, text, None, &clock);

    assert!(!is_overdue(&task, instant(2025, 6, 1, 23, 59, 0)));
}

#[rstest]
fn completed_task_is_never_overdue() {
    let mut task = scheduled_task(DayBucket::Today, "09:00");
    let clock = FixedClock(instant(2025, 6, 1, 8, 0, 0));
    task.apply(TaskPatch::new().with_completed(true), &clock)
        .expect("valid patch");

    assert!(!is_overdue(&task, instant(2025, 6, 1, 9, 1, 0)));
}

#[rstest]
#[case(instant(2025, 6, 1, 9, 1, 0), true)]
#[case(instant(2025, 6, 1, 8, 59, 0), false)]
// Strictly after: the due instant itself is not overdue.
#[case(instant(2025, 6, 1, 9, 0, 0), false)]
#[case(instant(2025, 6, 1, 9, 0, 1), true)]
fn today_task_overdue_only_strictly_past_its_time(
    #[case] now: chrono::DateTime<chrono::Utc>,
    #[case] expected: bool,
) {
    let task = scheduled_task(DayBucket::Today, "09:00");
    assert_eq!(is_overdue(&task, now), expected);
}

#[rstest]
#[case(DayBucket::Tomorrow)]
#[case(DayBucket::AfterTomorrow)]
fn overdue_is_a_today_only_concept(#[case] day: DayBucket) {
    // A past-dated time sitting in a later bucket never classifies; the
    // bucket's calendar offset keeps its due instant in the future.
    let task = scheduled_task(day, "09:00");
    assert!(!is_overdue(&task, instant(2025, 6, 1, 23, 0, 0)));
}

#[rstest]
fn due_instant_applies_bucket_offset() {
    let time = TaskTime::new("09:30").expect("valid time");
    let now = instant(2025, 6, 1, 12, 0, 0);

    assert_eq!(
        due_instant(DayBucket::Today, time, now),
        instant(2025, 6, 1, 9, 30, 0)
    );
    assert_eq!(
        due_instant(DayBucket::Tomorrow, time, now),
        instant(2025, 6, 2, 9, 30, 0)
    );
    assert_eq!(
        due_instant(DayBucket::AfterTomorrow, time, now),
        instant(2025, 6, 3, 9, 30, 0)
    );
}
