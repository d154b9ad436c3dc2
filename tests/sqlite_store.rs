//! Integration tests for [`SqlitePlannerStore`] against a real database.
//!
//! These tests exercise the embedded `SQLite` repository implementation,
//! verifying CRUD operations, uniqueness constraints, boundary semantics of
//! bulk deletes, and tolerance of corrupt rows.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use mockable::Clock;
use rstest::rstest;
use triday::planner::{
    adapters::sqlite::SqlitePlannerStore,
    domain::{DayBucket, Project, Task, TaskId, TaskPatch, TaskText, TaskTime},
    ports::{ProjectRepository, StoreError, TaskRepository},
};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn instant(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .expect("valid test instant")
}

fn memory_store() -> SqlitePlannerStore {
    SqlitePlannerStore::open(":memory:").expect("store opens")
}

fn task_at(day: DayBucket, label: &str, time: Option<&str>, created: DateTime<Utc>) -> Task {
    let text = TaskText::new(label).expect("valid text");
    let parsed = time.map(|raw| TaskTime::new(raw).expect("valid time"));
    Task::new(day, text, parsed, &FixedClock(created))
}

#[rstest]
#[tokio::test]
async fn insert_then_find_round_trips_the_record() -> eyre::Result<()> {
    let store = memory_store();
    let created = instant(2025, 6, 1, 8, 0, 0);
    let task = task_at(DayBucket::Today, "water the plants", Some("07:30"), created);

    store.insert(&task).await?;

    let found = store
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("inserted task not found"))?;
    eyre::ensure!(found == task, "round-tripped task differs from the original");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn duplicate_insert_is_rejected() {
    let store = memory_store();
    let task = task_at(
        DayBucket::Today,
        "once only",
        None,
        instant(2025, 6, 1, 8, 0, 0),
    );
    store.insert(&task).await.expect("first insert");

    let result = store.insert(&task).await;

    assert!(matches!(
        result,
        Err(StoreError::DuplicateTask(id)) if id == task.id()
    ));
}

#[rstest]
#[tokio::test]
async fn update_persists_merged_fields() {
    let store = memory_store();
    let created = instant(2025, 6, 1, 8, 0, 0);
    let mut task = task_at(DayBucket::Today, "draft", Some("09:00"), created);
    store.insert(&task).await.expect("insert");

    let later = FixedClock(instant(2025, 6, 1, 10, 0, 0));
    task.apply(
        TaskPatch::new()
            .with_day(DayBucket::Tomorrow)
            .clearing_time()
            .with_completed(true),
        &later,
    )
    .expect("valid patch");
    store.update(&task).await.expect("update");

    let found = store
        .find_by_id(task.id())
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(found.day(), DayBucket::Tomorrow);
    // Cleared time must persist as cleared, not survive from the old row.
    assert_eq!(found.time(), None);
    assert!(found.completed());
    assert_eq!(found.updated(), Some(later.0));
}

#[rstest]
#[tokio::test]
async fn update_of_unknown_task_reports_not_found() {
    let store = memory_store();
    let task = task_at(
        DayBucket::Today,
        "never inserted",
        None,
        instant(2025, 6, 1, 8, 0, 0),
    );

    let result = store.update(&task).await;

    assert!(matches!(
        result,
        Err(StoreError::NotFound(id)) if id == task.id()
    ));
}

#[rstest]
#[tokio::test]
async fn delete_of_unknown_task_reports_not_found() {
    let store = memory_store();
    let missing = TaskId::new();

    let result = store.delete(missing).await;

    assert!(matches!(
        result,
        Err(StoreError::NotFound(id)) if id == missing
    ));
}

#[rstest]
#[tokio::test]
async fn listings_order_by_creation_time_and_filter_by_day() -> eyre::Result<()> {
    let store = memory_store();
    let base = instant(2025, 6, 1, 8, 0, 0);
    let second = task_at(DayBucket::Today, "second", None, base + Duration::minutes(5));
    let first = task_at(DayBucket::Today, "first", None, base);
    let elsewhere = task_at(DayBucket::Tomorrow, "elsewhere", None, base);
    store.insert(&second).await?;
    store.insert(&first).await?;
    store.insert(&elsewhere).await?;

    let today = store.list_by_day(DayBucket::Today).await?;
    eyre::ensure!(
        today == vec![first.clone(), second.clone()],
        "today listing out of creation order"
    );

    let all = store.list_all().await?;
    eyre::ensure!(all.len() == 3, "expected all three tasks");
    eyre::ensure!(
        all.first().map(Task::id) == Some(first.id()),
        "oldest task should list first"
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn delete_created_before_retains_the_exact_boundary() {
    let store = memory_store();
    let cutoff = instant(2025, 6, 1, 12, 0, 0);
    let stale = task_at(
        DayBucket::Today,
        "stale",
        None,
        cutoff - Duration::microseconds(1),
    );
    let boundary = task_at(DayBucket::Today, "boundary", None, cutoff);
    let fresh = task_at(DayBucket::Today, "fresh", None, cutoff + Duration::days(1));
    store.insert(&stale).await.expect("insert");
    store.insert(&boundary).await.expect("insert");
    store.insert(&fresh).await.expect("insert");

    let removed = store.delete_created_before(cutoff).await.expect("cleanup");

    assert_eq!(removed, 1);
    assert_eq!(store.find_by_id(stale.id()).await.expect("lookup"), None);
    assert!(store.find_by_id(boundary.id()).await.expect("lookup").is_some());
    assert!(store.find_by_id(fresh.id()).await.expect("lookup").is_some());
}

#[rstest]
#[tokio::test]
async fn replace_all_swaps_the_entire_task_set() {
    let store = memory_store();
    let old = task_at(DayBucket::Today, "old", None, instant(2025, 6, 1, 8, 0, 0));
    store.insert(&old).await.expect("insert");

    let incoming = vec![
        task_at(DayBucket::Tomorrow, "new one", None, instant(2025, 6, 2, 8, 0, 0)),
        task_at(DayBucket::Today, "new two", Some("10:00"), instant(2025, 6, 2, 9, 0, 0)),
    ];
    store.replace_all(&incoming).await.expect("replace");

    let all = store.list_all().await.expect("list all");
    assert_eq!(all.len(), 2);
    assert_eq!(store.find_by_id(old.id()).await.expect("lookup"), None);
}

#[rstest]
#[tokio::test]
async fn project_save_current_clear_round_trip() {
    let store = memory_store();
    assert_eq!(store.current().await.expect("lookup"), None);

    let clock = FixedClock(instant(2025, 6, 1, 8, 0, 0));
    let project = Project::new("spring cleaning", &clock);
    store.save(&project).await.expect("save");
    assert_eq!(store.current().await.expect("lookup"), Some(project.clone()));

    // Saving again overwrites the singleton.
    let renamed = Project::new("summer cleaning", &clock);
    store.save(&renamed).await.expect("save again");
    assert_eq!(store.current().await.expect("lookup"), Some(renamed));

    store.clear().await.expect("clear");
    assert_eq!(store.current().await.expect("lookup"), None);
}

/// Opens a file-backed store plus a raw connection for row injection.
fn file_backed_store() -> (SqlitePlannerStore, SqliteConnection, std::path::PathBuf) {
    let path = std::env::temp_dir().join(format!("triday-test-{}.db", uuid::Uuid::new_v4()));
    let url = path.to_string_lossy().into_owned();
    let store = SqlitePlannerStore::open(&url).expect("store opens");
    let connection = SqliteConnection::establish(&url).expect("raw connection");
    (store, connection, path)
}

#[rstest]
#[tokio::test]
async fn list_reads_skip_corrupt_rows() {
    let (store, mut connection, path) = file_backed_store();
    let healthy = task_at(
        DayBucket::Today,
        "healthy",
        None,
        instant(2025, 6, 1, 8, 0, 0),
    );
    store.insert(&healthy).await.expect("insert");

    diesel::sql_query(
        "INSERT INTO tasks (id, day, text, time, completed, created) \
         VALUES ('not-a-uuid', 'someday', 'corrupt', NULL, 0, 0)",
    )
    .execute(&mut connection)
    .expect("inject corrupt row");

    let all = store.list_all().await.expect("list all");
    assert_eq!(all, vec![healthy.clone()]);

    let today = store.list_by_day(DayBucket::Today).await.expect("list");
    assert_eq!(today, vec![healthy]);

    drop(store);
    drop(connection);
    std::fs::remove_file(path).expect("cleanup");
}

#[rstest]
#[tokio::test]
async fn point_lookup_of_corrupt_row_reports_corruption() {
    let (store, mut connection, path) = file_backed_store();
    let id = TaskId::new();
    diesel::sql_query(format!(
        "INSERT INTO tasks (id, day, text, time, completed, created) \
         VALUES ('{id}', 'someday', 'corrupt', NULL, 0, 0)"
    ))
    .execute(&mut connection)
    .expect("inject corrupt row");

    let result = store.find_by_id(id).await;

    assert!(matches!(result, Err(StoreError::CorruptRecord(_))));

    drop(store);
    drop(connection);
    std::fs::remove_file(path).expect("cleanup");
}
