//! Shared fixtures for planner tests.

use crate::notify::{ChangeNotifier, PlannerEvent};
use crate::planner::{
    adapters::memory::InMemoryPlannerStore,
    domain::{DayBucket, Project, Task, TaskId},
    ports::{ProjectRepository, StoreError, StoreResult, TaskRepository},
};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Builds a UTC instant for test scenarios.
pub fn instant(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .expect("valid test instant")
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock yielding a queued sequence of instants, then a fallback.
///
/// Gives each created task a distinct `created` stamp so ordering
/// assertions are deterministic.
#[derive(Debug)]
pub struct SeqClock {
    times: Mutex<VecDeque<DateTime<Utc>>>,
    fallback: DateTime<Utc>,
}

impl SeqClock {
    pub fn new(times: impl IntoIterator<Item = DateTime<Utc>>, fallback: DateTime<Utc>) -> Self {
        Self {
            times: Mutex::new(times.into_iter().collect()),
            fallback,
        }
    }
}

impl Clock for SeqClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.times
            .lock()
            .expect("clock lock")
            .pop_front()
            .unwrap_or(self.fallback)
    }
}

/// Notifier capturing every published event for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<PlannerEvent>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PlannerEvent> {
        self.events.lock().expect("notifier lock").clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().expect("notifier lock").len()
    }
}

#[async_trait]
impl ChangeNotifier for RecordingNotifier {
    async fn notify(&self, event: PlannerEvent) {
        self.events.lock().expect("notifier lock").push(event);
    }
}

/// Store decorator injecting an update failure for one task.
#[derive(Debug, Clone)]
pub struct FlakyStore {
    inner: InMemoryPlannerStore,
    fail_update_for: TaskId,
}

impl FlakyStore {
    pub fn new(inner: InMemoryPlannerStore, fail_update_for: TaskId) -> Self {
        Self {
            inner,
            fail_update_for,
        }
    }
}

#[async_trait]
impl TaskRepository for FlakyStore {
    async fn insert(&self, task: &Task) -> StoreResult<()> {
        self.inner.insert(task).await
    }

    async fn update(&self, task: &Task) -> StoreResult<()> {
        if task.id() == self.fail_update_for {
            return Err(StoreError::persistence(std::io::Error::other(
                "injected update failure",
            )));
        }
        self.inner.update(task).await
    }

    async fn find_by_id(&self, id: TaskId) -> StoreResult<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn list_by_day(&self, day: DayBucket) -> StoreResult<Vec<Task>> {
        self.inner.list_by_day(day).await
    }

    async fn list_all(&self) -> StoreResult<Vec<Task>> {
        self.inner.list_all().await
    }

    async fn delete(&self, id: TaskId) -> StoreResult<()> {
        self.inner.delete(id).await
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> StoreResult<u64> {
        self.inner.delete_created_before(cutoff).await
    }

    async fn replace_all(&self, tasks: &[Task]) -> StoreResult<()> {
        self.inner.replace_all(tasks).await
    }
}

#[async_trait]
impl ProjectRepository for FlakyStore {
    async fn save(&self, project: &Project) -> StoreResult<()> {
        self.inner.save(project).await
    }

    async fn current(&self) -> StoreResult<Option<Project>> {
        self.inner.current().await
    }

    async fn clear(&self) -> StoreResult<()> {
        self.inner.clear().await
    }
}
