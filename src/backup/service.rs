//! Backup orchestration: building export documents and applying imports.

use super::EXPORT_VERSION;
use crate::notify::{ChangeNotifier, PlannerEvent};
use crate::planner::{
    domain::{Project, Task},
    ports::{ProjectRepository, StoreError, TaskRepository},
    services::MutationGate,
};
use crate::settings::{Settings, SettingsError, SettingsStore};
use cap_std::fs_utf8::Dir;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Full dump of the persistence boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    /// Every task across all buckets.
    pub tasks: Vec<Task>,
    /// The current project record, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_project: Option<Project>,
    /// The settings blob, if ever saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

/// A versioned, timestamped export of all persisted state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Format version the document was written with.
    pub version: String,
    /// When the export was taken.
    pub timestamp: DateTime<Utc>,
    /// The dumped state.
    pub data: BackupData,
}

/// Errors returned by backup operations.
#[derive(Debug, Error)]
pub enum BackupError {
    /// The document's version field is missing or empty.
    #[error("unsupported backup version: '{0}'")]
    UnsupportedVersion(String),

    /// A task or project store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A settings store operation failed.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The document could not be serialized or parsed.
    #[error("backup document error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A backup file could not be read or written.
    #[error("backup file error: {0}")]
    File(#[from] std::io::Error),
}

/// Returns the conventional backup file name for the given date,
/// `triday-backup-YYYY-MM-DD.json`.
#[must_use]
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("triday-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Backup orchestration service.
#[derive(Clone)]
pub struct BackupService<R, P, S, N, C>
where
    R: TaskRepository,
    P: ProjectRepository,
    S: SettingsStore,
    N: ChangeNotifier,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    projects: Arc<P>,
    settings: Arc<S>,
    notifier: Arc<N>,
    clock: Arc<C>,
    gate: MutationGate,
}

impl<R, P, S, N, C> BackupService<R, P, S, N, C>
where
    R: TaskRepository,
    P: ProjectRepository,
    S: SettingsStore,
    N: ChangeNotifier,
    C: Clock + Send + Sync,
{
    /// Creates a new backup service sharing the given mutation gate.
    #[must_use]
    pub const fn new(
        tasks: Arc<R>,
        projects: Arc<P>,
        settings: Arc<S>,
        notifier: Arc<N>,
        clock: Arc<C>,
        gate: MutationGate,
    ) -> Self {
        Self {
            tasks,
            projects,
            settings,
            notifier,
            clock,
            gate,
        }
    }

    /// Builds an export document from the current persisted state.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError`] when any store read fails.
    pub async fn export_document(&self) -> Result<ExportDocument, BackupError> {
        let tasks = self.tasks.list_all().await?;
        let current_project = self.projects.current().await?;
        let settings = self.settings.load().await?;
        Ok(ExportDocument {
            version: EXPORT_VERSION.to_owned(),
            timestamp: self.clock.utc(),
            data: BackupData {
                tasks,
                current_project,
                settings,
            },
        })
    }

    /// Replaces all persisted state with the document's contents.
    ///
    /// Runs under the mutation gate as one logical transaction, then
    /// publishes the resulting snapshot (and a settings event when the
    /// document carried a settings blob).
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::UnsupportedVersion`] for an empty version
    /// field, or [`BackupError`] when a store write fails.
    pub async fn import_document(&self, document: ExportDocument) -> Result<(), BackupError> {
        if document.version.trim().is_empty() {
            return Err(BackupError::UnsupportedVersion(document.version));
        }

        let guard = self.gate.acquire().await;
        self.tasks.replace_all(&document.data.tasks).await?;
        match &document.data.current_project {
            Some(project) => self.projects.save(project).await?,
            None => self.projects.clear().await?,
        }
        if let Some(settings) = &document.data.settings {
            self.settings.save(settings).await?;
        }
        drop(guard);

        crate::planner::services::publish_tasks_updated(
            &*self.tasks,
            &*self.projects,
            &*self.notifier,
        )
        .await;
        if let Some(settings) = document.data.settings {
            self.notifier
                .notify(PlannerEvent::SettingsUpdated { settings })
                .await;
        }
        Ok(())
    }

    /// Exports the current state into `dir` under the conventional dated
    /// file name and returns that name.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError`] when a store read or the file write fails.
    pub async fn export_to_dir(&self, dir: &Dir) -> Result<String, BackupError> {
        let document = self.export_document().await?;
        let name = backup_file_name(document.timestamp.date_naive());
        let json = serde_json::to_string_pretty(&document)?;
        dir.write(&name, json)?;
        Ok(name)
    }

    /// Imports a previously exported file from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError`] when the file cannot be read or parsed, or
    /// when the import fails.
    pub async fn import_from_dir(&self, dir: &Dir, name: &str) -> Result<(), BackupError> {
        let json = dir.read_to_string(name)?;
        let document: ExportDocument = serde_json::from_str(&json)?;
        self.import_document(document).await
    }
}
