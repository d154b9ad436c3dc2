//! `SQLite` repository implementation for planner persistence.

use super::{
    models::{NewTaskRow, ProjectRow, TaskRow, project_to_row, row_to_project, row_to_task,
             task_to_row},
    schema::{projects, tasks},
};
use crate::planner::{
    domain::{DayBucket, PROJECT_KEY, Project, Task, TaskId},
    ports::{ProjectRepository, StoreError, StoreResult, TaskRepository},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use tracing::warn;

/// `SQLite` connection pool type used by planner adapters.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Schema bootstrap, applied idempotently on open: the task table with
/// secondary indices on `day` and `created`, and the singleton project
/// table.
const SETUP_SQL: &str = "\
CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY NOT NULL,
    day TEXT NOT NULL,
    text TEXT NOT NULL,
    time TEXT,
    completed BOOLEAN NOT NULL DEFAULT 0,
    created BIGINT NOT NULL,
    updated BIGINT
);
CREATE INDEX IF NOT EXISTS idx_tasks_day ON tasks (day);
CREATE INDEX IF NOT EXISTS idx_tasks_created ON tasks (created);
CREATE TABLE IF NOT EXISTS projects (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    updated BIGINT NOT NULL
);
";

/// `SQLite`-backed planner store.
#[derive(Debug, Clone)]
pub struct SqlitePlannerStore {
    pool: SqlitePool,
}

impl SqlitePlannerStore {
    /// Opens (and if necessary creates) the embedded store at the given
    /// database URL, applying the schema bootstrap.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the database cannot be
    /// opened or the schema cannot be created; callers are expected to fall
    /// back to the in-memory store in that case.
    pub fn open(database_url: &str) -> StoreResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        // A single pooled connection keeps `:memory:` databases coherent and
        // serialises writes the way SQLite expects.
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(StoreError::unavailable)?;
        let mut connection = pool.get().map_err(StoreError::unavailable)?;
        connection
            .batch_execute(SETUP_SQL)
            .map_err(StoreError::unavailable)?;
        drop(connection);
        Ok(Self { pool })
    }

    /// Creates a store from an existing pool, assuming the schema exists.
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(StoreError::persistence)?
    }
}

/// Decodes loaded rows, excluding the ones that fail to decode.
///
/// Corrupt rows (unknown bucket value, malformed field) are dropped from
/// list reads rather than failing the whole read.
fn decode_rows(rows: Vec<TaskRow>) -> Vec<Task> {
    rows.into_iter()
        .filter_map(|row| {
            let row_id = row.id.clone();
            match row_to_task(row) {
                Ok(task) => Some(task),
                Err(err) => {
                    warn!(id = %row_id, error = %err, "skipping corrupt task record");
                    None
                }
            }
        })
        .collect()
}

fn rows_affected(count: usize) -> StoreResult<u64> {
    u64::try_from(count).map_err(StoreError::persistence)
}

#[async_trait]
impl TaskRepository for SqlitePlannerStore {
    async fn insert(&self, task: &Task) -> StoreResult<()> {
        let task_id = task.id();
        let row = task_to_row(task);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StoreError::DuplicateTask(task_id)
                    }
                    _ => StoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> StoreResult<()> {
        let task_id = task.id();
        let row = task_to_row(task);
        self.run_blocking(move |connection| {
            let changed = diesel::update(tasks::table.find(task_id.to_string()))
                .set(&row)
                .execute(connection)
                .map_err(StoreError::persistence)?;
            if changed == 0 {
                return Err(StoreError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> StoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.to_string())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(StoreError::persistence)?;
            row.map(|value| row_to_task(value).map_err(|err| StoreError::corrupt(err.to_string())))
                .transpose()
        })
        .await
    }

    async fn list_by_day(&self, day: DayBucket) -> StoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::day.eq(day.as_str()))
                .order(tasks::created.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(StoreError::persistence)?;
            Ok(decode_rows(rows))
        })
        .await
    }

    async fn list_all(&self) -> StoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .order(tasks::created.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(StoreError::persistence)?;
            Ok(decode_rows(rows))
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> StoreResult<()> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(tasks::table.find(id.to_string()))
                .execute(connection)
                .map_err(StoreError::persistence)?;
            if removed == 0 {
                return Err(StoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> StoreResult<u64> {
        let cutoff_micros = cutoff.timestamp_micros();
        self.run_blocking(move |connection| {
            let removed = diesel::delete(tasks::table.filter(tasks::created.lt(cutoff_micros)))
                .execute(connection)
                .map_err(StoreError::persistence)?;
            rows_affected(removed)
        })
        .await
    }

    async fn replace_all(&self, tasks_to_keep: &[Task]) -> StoreResult<()> {
        let rows: Vec<NewTaskRow> = tasks_to_keep.iter().map(task_to_row).collect();
        self.run_blocking(move |connection| {
            connection
                .transaction(|inner| {
                    diesel::delete(tasks::table).execute(inner)?;
                    diesel::insert_into(tasks::table).values(&rows).execute(inner)?;
                    Ok::<(), DieselError>(())
                })
                .map_err(StoreError::persistence)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl ProjectRepository for SqlitePlannerStore {
    async fn save(&self, project: &Project) -> StoreResult<()> {
        let row = project_to_row(project);
        self.run_blocking(move |connection| {
            diesel::replace_into(projects::table)
                .values(&row)
                .execute(connection)
                .map_err(StoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn current(&self) -> StoreResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(PROJECT_KEY)
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(StoreError::persistence)?;
            row.map(|value| {
                row_to_project(value).map_err(|err| StoreError::corrupt(err.to_string()))
            })
            .transpose()
        })
        .await
    }

    async fn clear(&self) -> StoreResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(projects::table.find(PROJECT_KEY))
                .execute(connection)
                .map_err(StoreError::persistence)?;
            Ok(())
        })
        .await
    }
}
