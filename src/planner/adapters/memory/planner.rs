//! Thread-safe in-memory implementation of the planner store ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::planner::{
    domain::{DayBucket, Project, Task, TaskId},
    ports::{ProjectRepository, StoreError, StoreResult, TaskRepository},
};

/// Thread-safe in-memory planner store.
///
/// Backs tests and the degraded path callers fall back to when the embedded
/// store fails to open. Typed storage means corrupt records cannot occur
/// here.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlannerStore {
    state: Arc<RwLock<InMemoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    tasks: HashMap<TaskId, Task>,
    project: Option<Project>,
}

impl InMemoryPlannerStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, InMemoryState>> {
        self.state
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, InMemoryState>> {
        self.state
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

fn sorted_by_created(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by_key(Task::created);
    tasks
}

#[async_trait]
impl TaskRepository for InMemoryPlannerStore {
    async fn insert(&self, task: &Task) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(StoreError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> StoreResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(StoreError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_by_day(&self, day: DayBucket) -> StoreResult<Vec<Task>> {
        let state = self.read()?;
        let tasks = state
            .tasks
            .values()
            .filter(|task| task.day() == day)
            .cloned()
            .collect();
        Ok(sorted_by_created(tasks))
    }

    async fn list_all(&self) -> StoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(sorted_by_created(state.tasks.values().cloned().collect()))
    }

    async fn delete(&self, id: TaskId) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.tasks.remove(&id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> StoreResult<u64> {
        let mut state = self.write()?;
        let before = state.tasks.len();
        state.tasks.retain(|_, task| task.created() >= cutoff);
        let removed = before.saturating_sub(state.tasks.len());
        u64::try_from(removed).map_err(StoreError::persistence)
    }

    async fn replace_all(&self, tasks: &[Task]) -> StoreResult<()> {
        let mut state = self.write()?;
        state.tasks = tasks.iter().map(|task| (task.id(), task.clone())).collect();
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryPlannerStore {
    async fn save(&self, project: &Project) -> StoreResult<()> {
        let mut state = self.write()?;
        state.project = Some(project.clone());
        Ok(())
    }

    async fn current(&self) -> StoreResult<Option<Project>> {
        let state = self.read()?;
        Ok(state.project.clone())
    }

    async fn clear(&self) -> StoreResult<()> {
        let mut state = self.write()?;
        state.project = None;
        Ok(())
    }
}
