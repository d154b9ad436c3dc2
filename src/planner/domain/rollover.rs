//! Pure rollover policy: given a snapshot of the buckets, decide which
//! tasks move where and which are deleted.
//!
//! The planners never mutate anything; the rollover service applies the
//! resulting plan through the task repository. Working from an entry
//! snapshot keeps the daily advance from re-promoting tasks it just demoted
//! within the same pass.

use super::{DayBucket, Task, TaskId, is_overdue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a task was moved between buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveReason {
    /// A scheduled today task whose time passed was promoted to tomorrow.
    OverduePromotion,
    /// An incomplete today task carried over to tomorrow at day end.
    IncompleteCarryover,
    /// A tomorrow or day-after-tomorrow task advanced one day closer.
    DailyAdvance,
}

/// A single bucket reassignment the rollover engine intends to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    /// Task to reassign.
    pub id: TaskId,
    /// Bucket the task occupied in the entry snapshot.
    pub from: DayBucket,
    /// Bucket the task is reassigned to.
    pub to: DayBucket,
    /// Why the move happens.
    pub reason: MoveReason,
}

/// The full set of mutations one daily rollover pass performs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolloverPlan {
    /// Completed today tasks to delete.
    pub delete: Vec<TaskId>,
    /// Bucket reassignments, in application order.
    pub moves: Vec<PlannedMove>,
}

impl RolloverPlan {
    /// Returns whether the plan performs no mutations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delete.is_empty() && self.moves.is_empty()
    }
}

/// Plans one daily rollover from an entry snapshot of all three buckets.
///
/// In order: completed today tasks are deleted; remaining today tasks carry
/// over to tomorrow; the snapshot's tomorrow tasks become today; the
/// snapshot's day-after-tomorrow tasks become tomorrow. Each task appears in
/// the plan at most once, so no task is lost or duplicated.
#[must_use]
pub fn plan_daily_rollover(
    today: &[Task],
    tomorrow: &[Task],
    after_tomorrow: &[Task],
) -> RolloverPlan {
    let mut plan = RolloverPlan::default();

    for task in today {
        if task.completed() {
            plan.delete.push(task.id());
        } else {
            plan.moves.push(PlannedMove {
                id: task.id(),
                from: DayBucket::Today,
                to: DayBucket::Tomorrow,
                reason: MoveReason::IncompleteCarryover,
            });
        }
    }

    for task in tomorrow {
        plan.moves.push(PlannedMove {
            id: task.id(),
            from: DayBucket::Tomorrow,
            to: DayBucket::Today,
            reason: MoveReason::DailyAdvance,
        });
    }

    for task in after_tomorrow {
        plan.moves.push(PlannedMove {
            id: task.id(),
            from: DayBucket::AfterTomorrow,
            to: DayBucket::Tomorrow,
            reason: MoveReason::DailyAdvance,
        });
    }

    plan
}

/// Plans overdue promotion for a snapshot of the today bucket.
///
/// Incomplete, scheduled today tasks whose due instant is strictly before
/// `now` are promoted to tomorrow. Promotion only inspects today, so running
/// it twice with the same `now` is a no-op the second time.
#[must_use]
pub fn plan_overdue_promotion(today: &[Task], now: DateTime<Utc>) -> Vec<PlannedMove> {
    today
        .iter()
        .filter(|task| is_overdue(task, now))
        .map(|task| PlannedMove {
            id: task.id(),
            from: DayBucket::Today,
            to: DayBucket::Tomorrow,
            reason: MoveReason::OverduePromotion,
        })
        .collect()
}
