//! Pure rollover planner tests.

use super::support::{FixedClock, instant};
use crate::planner::domain::{
    DayBucket, MoveReason, Task, TaskId, TaskPatch, TaskText, TaskTime, plan_daily_rollover,
    plan_overdue_promotion,
};
use rstest::rstest;
use std::collections::HashSet;

fn task(day: DayBucket, label: &str, completed: bool) -> Task {
    let clock = FixedClock(instant(2025, 6, 1, 0, 0, 0));
    let text = TaskText::new(label).expect("valid text");
    let mut built = Task::new(day, text, None, &clock);
    if completed {
        built
            .apply(TaskPatch::new().with_completed(true), &clock)
            .expect("valid patch");
    }
    built
}

fn scheduled(day: DayBucket, label: &str, time: &str) -> Task {
    let clock = FixedClock(instant(2025, 6, 1, 0, 0, 0));
    let text = TaskText::new(label).expect("valid text");
    let parsed = TaskTime::new(time).expect("valid time");
    Task::new(day, text, Some(parsed), &clock)
}

#[rstest]
fn daily_rollover_plans_the_full_advance() {
    let done_today = task(DayBucket::Today, "done", true);
    let open_today = task(DayBucket::Today, "open", false);
    let tomorrow = task(DayBucket::Tomorrow, "tomorrow", false);
    let after = task(DayBucket::AfterTomorrow, "after", false);

    let plan = plan_daily_rollover(
        &[done_today.clone(), open_today.clone()],
        std::slice::from_ref(&tomorrow),
        std::slice::from_ref(&after),
    );

    assert_eq!(plan.delete, vec![done_today.id()]);
    assert_eq!(plan.moves.len(), 3);

    let move_for = |id: TaskId| {
        plan.moves
            .iter()
            .find(|planned| planned.id == id)
            .expect("planned move")
    };
    let carryover = move_for(open_today.id());
    assert_eq!(carryover.to, DayBucket::Tomorrow);
    assert_eq!(carryover.reason, MoveReason::IncompleteCarryover);

    let advanced_tomorrow = move_for(tomorrow.id());
    assert_eq!(advanced_tomorrow.to, DayBucket::Today);
    assert_eq!(advanced_tomorrow.reason, MoveReason::DailyAdvance);

    let advanced_after = move_for(after.id());
    assert_eq!(advanced_after.to, DayBucket::Tomorrow);
    assert_eq!(advanced_after.reason, MoveReason::DailyAdvance);
}

#[rstest]
fn daily_rollover_touches_each_task_at_most_once() {
    let today: Vec<Task> = (0..3)
        .map(|index| task(DayBucket::Today, &format!("today-{index}"), index == 0))
        .collect();
    let tomorrow: Vec<Task> = (0..2)
        .map(|index| task(DayBucket::Tomorrow, &format!("tomorrow-{index}"), false))
        .collect();
    let after: Vec<Task> = (0..2)
        .map(|index| task(DayBucket::AfterTomorrow, &format!("after-{index}"), false))
        .collect();

    let plan = plan_daily_rollover(&today, &tomorrow, &after);

    let mut seen: HashSet<TaskId> = HashSet::new();
    for id in &plan.delete {
        assert!(seen.insert(*id), "task planned twice");
    }
    for planned in &plan.moves {
        assert!(seen.insert(planned.id), "task planned twice");
    }
    assert_eq!(seen.len(), 7);
}

#[rstest]
fn daily_rollover_of_empty_buckets_is_empty() {
    let plan = plan_daily_rollover(&[], &[], &[]);
    assert!(plan.is_empty());
}

#[rstest]
fn overdue_promotion_selects_only_incomplete_scheduled_past_tasks() {
    let overdue = scheduled(DayBucket::Today, "overdue", "09:00");
    let upcoming = scheduled(DayBucket::Today, "upcoming", "18:00");
    let unscheduled = task(DayBucket::Today, "unscheduled", false);
    let mut done = scheduled(DayBucket::Today, "done", "09:00");
    done.apply(
        TaskPatch::new().with_completed(true),
        &FixedClock(instant(2025, 6, 1, 9, 30, 0)),
    )
    .expect("valid patch");

    let now = instant(2025, 6, 1, 12, 0, 0);
    let moves = plan_overdue_promotion(
        &[overdue.clone(), upcoming, unscheduled, done],
        now,
    );

    assert_eq!(moves.len(), 1);
    let planned = moves.first().expect("one planned move");
    assert_eq!(planned.id, overdue.id());
    assert_eq!(planned.from, DayBucket::Today);
    assert_eq!(planned.to, DayBucket::Tomorrow);
    assert_eq!(planned.reason, MoveReason::OverduePromotion);
}
