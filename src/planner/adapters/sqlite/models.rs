//! Diesel row models and domain conversions for planner persistence.

use super::schema::{projects, tasks};
use crate::planner::domain::{
    DayBucket, ParseDayBucketError, PersistedTaskData, PlannerDomainError, Project, Task, TaskId,
    TaskTime,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use thiserror::Error;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    /// Task identifier as a UUID string.
    pub id: String,
    /// Day bucket storage string.
    pub day: String,
    /// Task content.
    pub text: String,
    /// Optional `HH:MM` time-of-day.
    pub time: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp, epoch microseconds.
    pub created: i64,
    /// Latest-mutation timestamp, epoch microseconds.
    pub updated: Option<i64>,
}

/// Insert/update model for task records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewTaskRow {
    /// Task identifier as a UUID string.
    pub id: String,
    /// Day bucket storage string.
    pub day: String,
    /// Task content.
    pub text: String,
    /// Optional `HH:MM` time-of-day.
    pub time: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp, epoch microseconds.
    pub created: i64,
    /// Latest-mutation timestamp, epoch microseconds.
    pub updated: Option<i64>,
}

/// Query and insert model for the singleton project record.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProjectRow {
    /// Fixed singleton key.
    pub id: String,
    /// Project name.
    pub name: String,
    /// Last-save timestamp, epoch microseconds.
    pub updated: i64,
}

/// Reasons a stored row fails to decode into a domain value.
#[derive(Debug, Clone, Error)]
pub enum RowDecodeError {
    /// The stored identifier is not a UUID.
    #[error("invalid task identifier '{0}'")]
    Id(String),

    /// The stored day bucket is outside the known enum.
    #[error(transparent)]
    Day(#[from] ParseDayBucketError),

    /// The stored text or time fails domain validation.
    #[error(transparent)]
    Field(#[from] PlannerDomainError),

    /// A stored timestamp is outside the representable range.
    #[error("timestamp out of range: {0}")]
    Timestamp(i64),
}

fn decode_timestamp(micros: i64) -> Result<DateTime<Utc>, RowDecodeError> {
    DateTime::from_timestamp_micros(micros).ok_or(RowDecodeError::Timestamp(micros))
}

/// Decodes a stored row into a domain task.
pub fn row_to_task(row: TaskRow) -> Result<Task, RowDecodeError> {
    let TaskRow {
        id,
        day,
        text,
        time,
        completed,
        created,
        updated,
    } = row;

    let uuid = uuid::Uuid::parse_str(&id).map_err(|_| RowDecodeError::Id(id))?;
    let data = PersistedTaskData {
        id: TaskId::from_uuid(uuid),
        day: DayBucket::try_from(day.as_str())?,
        text: crate::planner::domain::TaskText::new(text)?,
        time: time.as_deref().map(TaskTime::new).transpose()?,
        completed,
        created: decode_timestamp(created)?,
        updated: updated.map(decode_timestamp).transpose()?,
    };
    Ok(Task::from_persisted(data))
}

/// Encodes a domain task into its storage row.
#[must_use]
pub fn task_to_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().to_string(),
        day: task.day().as_str().to_owned(),
        text: task.text().as_str().to_owned(),
        time: task.time().map(|time| time.to_string()),
        completed: task.completed(),
        created: task.created().timestamp_micros(),
        updated: task.updated().map(|updated| updated.timestamp_micros()),
    }
}

/// Decodes the stored project row.
pub fn row_to_project(row: ProjectRow) -> Result<Project, RowDecodeError> {
    let updated = decode_timestamp(row.updated)?;
    Ok(Project::from_persisted(row.name, updated))
}

/// Encodes the project record into its storage row.
#[must_use]
pub fn project_to_row(project: &Project) -> ProjectRow {
    ProjectRow {
        id: crate::planner::domain::PROJECT_KEY.to_owned(),
        name: project.name().to_owned(),
        updated: project.updated().timestamp_micros(),
    }
}
