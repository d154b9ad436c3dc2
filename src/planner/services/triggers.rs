//! Periodic triggers for the rollover engine.
//!
//! The engine itself exposes the operations; cadence and the
//! at-most-once-per-day guard live here, with the caller.

use super::RolloverService;
use crate::notify::ChangeNotifier;
use crate::planner::ports::{ProjectRepository, TaskRepository};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

/// Tracks the last calendar day the daily rollover ran, allowing at most
/// one run per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBoundaryGuard {
    last_run: Option<NaiveDate>,
}

impl DayBoundaryGuard {
    /// Creates a guard that has never run; the first check fires.
    #[must_use]
    pub const fn new() -> Self {
        Self { last_run: None }
    }

    /// Creates a guard that treats `now`'s day as already rolled over.
    #[must_use]
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            last_run: Some(now.date_naive()),
        }
    }

    /// Returns whether the daily rollover should run at `now`.
    #[must_use]
    pub fn should_run(&self, now: DateTime<Utc>) -> bool {
        self.last_run.is_none_or(|date| date < now.date_naive())
    }

    /// Records that the rollover ran at `now`.
    pub fn mark_ran(&mut self, now: DateTime<Utc>) {
        self.last_run = Some(now.date_naive());
    }
}

/// Cadence for the periodic rollover checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloverSchedule {
    /// How often to check for overdue tasks and a crossed day boundary.
    pub check_every: Duration,
}

impl Default for RolloverSchedule {
    fn default() -> Self {
        Self {
            check_every: Duration::from_secs(15 * 60),
        }
    }
}

/// Spawns a background task driving the rollover engine.
///
/// Each tick runs the daily rollover when the calendar day has changed
/// since the last run, then the overdue-promotion pass. Dates are read
/// from the service clock, and the guard is seeded with the spawn-time
/// date, so a freshly started process does not immediately roll the
/// buckets. Cadence is best-effort; ticks are not required to be precise.
pub fn spawn_rollover_schedule<R, P, N, C>(
    service: Arc<RolloverService<R, P, N, C>>,
    schedule: RolloverSchedule,
) -> JoinHandle<()>
where
    R: TaskRepository + 'static,
    P: ProjectRepository + 'static,
    N: ChangeNotifier + 'static,
    C: Clock + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut guard = DayBoundaryGuard::seeded(service.now());
        let mut interval = tokio::time::interval(schedule.check_every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let now = service.now();
            if guard.should_run(now) {
                match service.advance_day().await {
                    Ok(_) => guard.mark_ran(now),
                    Err(err) => warn!(error = %err, "daily rollover failed"),
                }
            }
            if let Err(err) = service.move_overdue_tasks().await {
                warn!(error = %err, "overdue promotion failed");
            }
        }
    })
}
