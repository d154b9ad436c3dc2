//! Task store service: durable CRUD over tasks and the current project,
//! with a change notification after every state-changing mutation.

use super::{MutationGate, publish_tasks_updated};
use crate::notify::ChangeNotifier;
use crate::planner::{
    domain::{
        DayBucket, GroupedTasks, PlannerDomainError, PlannerSnapshot, Project, Task, TaskId,
        TaskPatch, TaskText, TaskTime,
    },
    ports::{ProjectRepository, StoreError, TaskRepository},
};
use chrono::Duration;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for adding a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    day: DayBucket,
    text: String,
    time: Option<String>,
}

impl AddTaskRequest {
    /// Creates a request for the given bucket and text.
    #[must_use]
    pub fn new(day: DayBucket, text: impl Into<String>) -> Self {
        Self {
            day,
            text: text.into(),
            time: None,
        }
    }

    /// Schedules the task at an `HH:MM` time-of-day; validated on add.
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}

/// Service-level errors for planner operations.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PlannerDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for planner service operations.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Task store orchestration service.
///
/// Every successful state-changing operation publishes exactly one
/// `TASKS_UPDATED` event carrying the resulting snapshot; operations that
/// change nothing publish nothing.
#[derive(Clone)]
pub struct TaskStoreService<R, P, N, C>
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

impl<R, P, N, C> TaskStoreService<R, P, N, C>
where
    R: TaskRepository,
    P: ProjectRepository,
    N: ChangeNotifier,
    C: Clock + Send + Sync,
{
    /// Creates a new task store service sharing the given mutation gate.
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

    /// Adds a new incomplete task and returns the canonical record.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Domain`] for empty text or a malformed time,
    /// or [`PlannerError::Store`] when persistence fails.
    pub async fn add_task(&self, request: AddTaskRequest) -> PlannerResult<Task> {
        let text = TaskText::new(request.text)?;
        let time = request.time.as_deref().map(TaskTime::new).transpose()?;
        let task = Task::new(request.day, text, time, &*self.clock);
        self.tasks.insert(&task).await?;
        self.publish().await;
        Ok(task)
    }

    /// Returns all tasks in the given bucket, ascending by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Store`] when the read fails.
    pub async fn tasks_for_day(&self, day: DayBucket) -> PlannerResult<Vec<Task>> {
        Ok(self.tasks.list_by_day(day).await?)
    }

    /// Partitions all tasks by bucket.
    ///
    /// Corrupt records are excluded by the adapter, so the partition covers
    /// every decodable task exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Store`] when the read fails.
    pub async fn tasks_grouped_by_day(&self) -> PlannerResult<GroupedTasks> {
        let all = self.tasks.list_all().await?;
        Ok(GroupedTasks::from_tasks(all))
    }

    /// Merges the patch into an existing task and returns the updated
    /// record; the read-modify-write runs under the mutation gate.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] (wrapped) for an unknown id, or
    /// [`PlannerError::Domain`] when a patched field fails validation.
    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) -> PlannerResult<Task> {
        let guard = self.gate.acquire().await;
        let mut task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(StoreError::NotFound(id))?;
        task.apply(patch, &*self.clock)?;
        self.tasks.update(&task).await?;
        drop(guard);
        self.publish().await;
        Ok(task)
    }

    /// Deletes a task and returns its identifier.
    ///
    /// Deliberately not idempotent: deleting an unknown id fails.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] (wrapped) for an unknown id.
    pub async fn delete_task(&self, id: TaskId) -> PlannerResult<TaskId> {
        let guard = self.gate.acquire().await;
        self.tasks.delete(id).await?;
        drop(guard);
        self.publish().await;
        Ok(id)
    }

    /// Upserts the singleton current-project record.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Store`] when persistence fails.
    pub async fn save_project(&self, name: impl Into<String> + Send) -> PlannerResult<Project> {
        let project = Project::new(name, &*self.clock);
        self.projects.save(&project).await?;
        self.publish().await;
        Ok(project)
    }

    /// Returns the current project name, empty when unset.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Store`] when the read fails.
    pub async fn current_project(&self) -> PlannerResult<String> {
        let current = self.projects.current().await?;
        Ok(current.map(|project| project.name().to_owned()).unwrap_or_default())
    }

    /// Deletes tasks created strictly before `days` days ago and returns
    /// the count removed. Tasks exactly at the boundary are retained.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Store`] when the delete fails.
    pub async fn clear_tasks_older_than(&self, days: u32) -> PlannerResult<u64> {
        let cutoff = self.clock.utc() - Duration::days(i64::from(days));
        let guard = self.gate.acquire().await;
        let removed = self.tasks.delete_created_before(cutoff).await?;
        drop(guard);
        if removed > 0 {
            self.publish().await;
        }
        Ok(removed)
    }

    /// Reads the authoritative snapshot without mutating anything.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Store`] when a read fails.
    pub async fn snapshot(&self) -> PlannerResult<PlannerSnapshot> {
        Ok(super::load_snapshot(&*self.tasks, &*self.projects).await?)
    }

    /// Returns the mutation gate shared with sibling services.
    #[must_use]
    pub const fn mutation_gate(&self) -> &MutationGate {
        &self.gate
    }

    async fn publish(&self) {
        publish_tasks_updated(&*self.tasks, &*self.projects, &*self.notifier).await;
    }
}
