//! Application services orchestrating the planner core.

mod gate;
mod rollover;
mod store;
mod triggers;

pub use gate::MutationGate;
pub use rollover::{RolloverFailure, RolloverReport, RolloverService, TaskMove};
pub use store::{AddTaskRequest, PlannerError, PlannerResult, TaskStoreService};
pub use triggers::{DayBoundaryGuard, RolloverSchedule, spawn_rollover_schedule};

use crate::notify::{ChangeNotifier, PlannerEvent};
use crate::planner::domain::{GroupedTasks, PlannerSnapshot, Project};
use crate::planner::ports::{ProjectRepository, StoreResult, TaskRepository};
use tracing::warn;

/// Reads the authoritative snapshot: current project plus the full task
/// partition in display order.
pub(crate) async fn load_snapshot<R, P>(tasks: &R, projects: &P) -> StoreResult<PlannerSnapshot>
where
    R: TaskRepository,
    P: ProjectRepository,
{
    let all = tasks.list_all().await?;
    let current = projects
        .current()
        .await?
        .as_ref()
        .map(Project::name)
        .unwrap_or_default()
        .to_owned();
    Ok(PlannerSnapshot::from_parts(
        current,
        GroupedTasks::from_tasks(all),
    ))
}

/// Publishes one `TASKS_UPDATED` event with the current snapshot.
///
/// Best-effort: a failed snapshot read is logged and swallowed so that
/// notification problems never fail the mutation that triggered them.
pub(crate) async fn publish_tasks_updated<R, P, N>(tasks: &R, projects: &P, notifier: &N)
where
    R: TaskRepository,
    P: ProjectRepository,
    N: ChangeNotifier,
{
    match load_snapshot(tasks, projects).await {
        Ok(snapshot) => notifier.notify(PlannerEvent::TasksUpdated { snapshot }).await,
        Err(err) => warn!(error = %err, "failed to read snapshot for change notification"),
    }
}
