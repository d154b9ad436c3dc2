//! Settings persistence port and in-memory adapter.

use super::Settings;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Result type for settings store operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors returned by settings store implementations.
#[derive(Debug, Clone, Error)]
pub enum SettingsError {
    /// Persistence-layer failure.
    #[error("settings persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SettingsError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Settings persistence contract.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Loads the stored blob, `None` when never saved.
    async fn load(&self) -> SettingsResult<Option<Settings>>;

    /// Overwrites the stored blob wholesale.
    async fn save(&self, settings: &Settings) -> SettingsResult<()>;
}

/// Thread-safe in-memory settings store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsStore {
    state: Arc<RwLock<Option<Settings>>>,
}

impl InMemorySettingsStore {
    /// Creates an empty in-memory settings store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(&self) -> SettingsResult<Option<Settings>> {
        let state = self
            .state
            .read()
            .map_err(|err| SettingsError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.clone())
    }

    async fn save(&self, settings: &Settings) -> SettingsResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| SettingsError::persistence(std::io::Error::other(err.to_string())))?;
        *state = Some(settings.clone());
        Ok(())
    }
}
