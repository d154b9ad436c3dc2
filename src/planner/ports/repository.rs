//! Repository ports for task and project persistence.

use crate::planner::domain::{DayBucket, Project, Task, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Task persistence contract.
///
/// Implementations index tasks by bucket and by creation time; list reads
/// return tasks in ascending `created` order and silently exclude corrupt
/// records (rows whose stored bucket value is outside the known enum).
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateTask`] when the task ID already exists.
    async fn insert(&self, task: &Task) -> StoreResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> StoreResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CorruptRecord`] when the stored row cannot be
    /// decoded.
    async fn find_by_id(&self, id: TaskId) -> StoreResult<Option<Task>>;

    /// Returns all tasks in the given bucket, ascending by creation time.
    async fn list_by_day(&self, day: DayBucket) -> StoreResult<Vec<Task>>;

    /// Returns all tasks across all buckets, ascending by creation time.
    async fn list_all(&self) -> StoreResult<Vec<Task>>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the task does not exist;
    /// deletion is deliberately not idempotent.
    async fn delete(&self, id: TaskId) -> StoreResult<()>;

    /// Deletes every task created strictly before `cutoff` and returns the
    /// number of rows removed. Tasks created exactly at the cutoff are
    /// retained.
    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> StoreResult<u64>;

    /// Replaces the entire task set wholesale, used by bulk import.
    async fn replace_all(&self, tasks: &[Task]) -> StoreResult<()>;
}

/// Current-project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Upserts the singleton project record.
    async fn save(&self, project: &Project) -> StoreResult<()>;

    /// Returns the singleton project record, `None` when unset.
    async fn current(&self) -> StoreResult<Option<Project>>;

    /// Removes the singleton project record, returning to the unset state.
    async fn clear(&self) -> StoreResult<()>;
}

/// Errors returned by store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A stored row could not be decoded into a domain task.
    #[error("corrupt task record: {0}")]
    CorruptRecord(String),

    /// The backing store failed to open or is unavailable.
    ///
    /// Surfaced once at the operation boundary; callers decide whether to
    /// retry or fall back to an alternate store.
    #[error("store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure during an individual operation.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a backend-unavailability error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Creates a corrupt-record error.
    #[must_use]
    pub fn corrupt(detail: impl Into<String>) -> Self {
        Self::CorruptRecord(detail.into())
    }
}
