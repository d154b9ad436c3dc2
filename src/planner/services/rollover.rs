//! Rollover engine: applies the pure rollover plans through the task
//! repository as best-effort batches.

use super::{MutationGate, PlannerResult, publish_tasks_updated};
use crate::notify::ChangeNotifier;
use crate::planner::{
    domain::{
        DayBucket, MoveReason, PlannedMove, Task, TaskId, plan_daily_rollover,
        plan_overdue_promotion,
    },
    ports::{ProjectRepository, StoreError, TaskRepository},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, warn};

/// A completed bucket reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    /// The task after the move.
    pub task: Task,
    /// Bucket the task occupied before the move.
    pub from: DayBucket,
    /// Bucket the task occupies now.
    pub to: DayBucket,
    /// Why the task moved.
    pub reason: MoveReason,
}

/// A task the engine failed to move or delete.
///
/// Tasks are independent, so one failure never aborts the rest of the
/// batch.
#[derive(Debug, Clone)]
pub struct RolloverFailure {
    /// The task that could not be processed.
    pub id: TaskId,
    /// The store error encountered.
    pub error: StoreError,
}

/// Outcome of one rollover or overdue-promotion pass.
#[derive(Debug, Clone, Default)]
pub struct RolloverReport {
    /// Tasks reassigned to another bucket.
    pub moved: Vec<TaskMove>,
    /// Tasks deleted (completed today tasks at day end).
    pub deleted: Vec<Task>,
    /// Tasks that could not be processed.
    pub failed: Vec<RolloverFailure>,
}

impl RolloverReport {
    /// Returns whether the pass changed any persisted state.
    #[must_use]
    pub fn changed_state(&self) -> bool {
        !self.moved.is_empty() || !self.deleted.is_empty()
    }
}

/// Rollover orchestration service.
///
/// Both operations take their bucket snapshot and apply all resulting
/// mutations while holding the shared mutation gate, so a pass behaves as
/// one logical transaction within the process.
#[derive(Clone)]
pub struct RolloverService<R, P, N, C>
where
    R: TaskRepository,
    P: ProjectRepository,
    N: ChangeNotifier,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    projects: Arc<P>,
    notifier: Arc<N>,
    clock: Arc<C>,
    gate: MutationGate,
}

impl<R, P, N, C> RolloverService<R, P, N, C>
where
    R: TaskRepository,
    P: ProjectRepository,
    N: ChangeNotifier,
    C: Clock + Send + Sync,
{
    /// Creates a new rollover service sharing the given mutation gate.
    #[must_use]
    pub const fn new(
        tasks: Arc<R>,
        projects: Arc<P>,
        notifier: Arc<N>,
        clock: Arc<C>,
        gate: MutationGate,
    ) -> Self {
        Self {
            tasks,
            projects,
            notifier,
            clock,
            gate,
        }
    }

    /// Returns the current instant from the service clock, so schedulers
    /// and the rollover passes agree on what "now" means.
    pub(super) fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Promotes incomplete, scheduled today tasks whose time has passed to
    /// tomorrow.
    ///
    /// Idempotent per call: promotion only inspects today, so tasks already
    /// promoted are no longer eligible.
    ///
    /// # Errors
    ///
    /// Returns [`super::PlannerError::Store`] when the today snapshot cannot
    /// be read; individual move failures are reported, not propagated.
    pub async fn move_overdue_tasks(&self) -> PlannerResult<RolloverReport> {
        let guard = self.gate.acquire().await;
        let today = self.tasks.list_by_day(DayBucket::Today).await?;
        let now = self.clock.utc();
        let moves = plan_overdue_promotion(&today, now);

        let mut report = RolloverReport::default();
        self.apply_moves(&today, moves, &mut report).await;
        drop(guard);

        debug!(
            moved = report.moved.len(),
            failed = report.failed.len(),
            "overdue promotion pass complete"
        );
        if report.changed_state() {
            publish_tasks_updated(&*self.tasks, &*self.projects, &*self.notifier).await;
        }
        Ok(report)
    }

    /// Runs one daily rollover from an entry snapshot of all three buckets.
    ///
    /// Completed today tasks are deleted; incomplete today tasks carry over
    /// to tomorrow; the snapshot's tomorrow becomes today and its
    /// day-after-tomorrow becomes tomorrow. Intended to run at most once
    /// per calendar day; date guarding is the caller's responsibility (see
    /// [`super::DayBoundaryGuard`]).
    ///
    /// # Errors
    ///
    /// Returns [`super::PlannerError::Store`] when the entry snapshot cannot
    /// be read; individual move and delete failures are reported, not
    /// propagated.
    pub async fn advance_day(&self) -> PlannerResult<RolloverReport> {
        let guard = self.gate.acquire().await;
        let today = self.tasks.list_by_day(DayBucket::Today).await?;
        let tomorrow = self.tasks.list_by_day(DayBucket::Tomorrow).await?;
        let after_tomorrow = self.tasks.list_by_day(DayBucket::AfterTomorrow).await?;
        let plan = plan_daily_rollover(&today, &tomorrow, &after_tomorrow);

        let mut report = RolloverReport::default();
        for id in &plan.delete {
            match self.tasks.delete(*id).await {
                Ok(()) => {
                    if let Some(task) = today.iter().find(|task| task.id() == *id) {
                        report.deleted.push(task.clone());
                    }
                }
                Err(error) => {
                    warn!(id = %id, error = %error, "failed to delete completed task");
                    report.failed.push(RolloverFailure { id: *id, error });
                }
            }
        }

        let snapshot: Vec<Task> = today
            .iter()
            .chain(tomorrow.iter())
            .chain(after_tomorrow.iter())
            .cloned()
            .collect();
        self.apply_moves(&snapshot, plan.moves, &mut report).await;
        drop(guard);

        debug!(
            moved = report.moved.len(),
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            "daily rollover pass complete"
        );
        if report.changed_state() {
            publish_tasks_updated(&*self.tasks, &*self.projects, &*self.notifier).await;
        }
        Ok(report)
    }

    /// Applies planned moves against the snapshot tasks, best-effort.
    ///
    /// Only `day` changes (plus the `updated` stamp); completion state and
    /// time are preserved.
    async fn apply_moves(
        &self,
        snapshot: &[Task],
        moves: Vec<PlannedMove>,
        report: &mut RolloverReport,
    ) {
        for planned in moves {
            let Some(found) = snapshot.iter().find(|task| task.id() == planned.id) else {
                continue;
            };
            let mut task = found.clone();
            task.reassign(planned.to, &*self.clock);
            match self.tasks.update(&task).await {
                Ok(()) => report.moved.push(TaskMove {
                    task,
                    from: planned.from,
                    to: planned.to,
                    reason: planned.reason,
                }),
                Err(error) => {
                    warn!(id = %planned.id, error = %error, "failed to move task");
                    report.failed.push(RolloverFailure {
                        id: planned.id,
                        error,
                    });
                }
            }
        }
    }
}
