//! Settings orchestration: load with defaults, update with broadcast.

use super::{Settings, SettingsResult, SettingsStore};
use crate::notify::{ChangeNotifier, PlannerEvent};
use std::sync::Arc;

/// Settings service: reads fall back to defaults, writes broadcast the new
/// blob as a `SETTINGS_UPDATED` event.
#[derive(Clone)]
pub struct SettingsService<S, N>
where
    S: SettingsStore,
    N: ChangeNotifier,
{
    store: Arc<S>,
    notifier: Arc<N>,
}

impl<S, N> SettingsService<S, N>
where
    S: SettingsStore,
    N: ChangeNotifier,
{
    /// Creates a new settings service.
    #[must_use]
    pub const fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self { store, notifier }
    }

    /// Returns the stored settings, or the defaults when never saved.
    ///
    /// # Errors
    ///
    /// Returns [`super::SettingsError`] when the store read fails.
    pub async fn load(&self) -> SettingsResult<Settings> {
        Ok(self.store.load().await?.unwrap_or_default())
    }

    /// Overwrites the settings blob and broadcasts the change.
    ///
    /// # Errors
    ///
    /// Returns [`super::SettingsError`] when the store write fails; no event
    /// is broadcast in that case.
    pub async fn update(&self, settings: Settings) -> SettingsResult<Settings> {
        self.store.save(&settings).await?;
        self.notifier
            .notify(PlannerEvent::SettingsUpdated {
                settings: settings.clone(),
            })
            .await;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::BroadcastNotifier;
    use crate::settings::{InMemorySettingsStore, Theme};
    use rstest::{fixture, rstest};

    type TestService = SettingsService<InMemorySettingsStore, BroadcastNotifier>;

    #[fixture]
    fn notifier() -> Arc<BroadcastNotifier> {
        Arc::new(BroadcastNotifier::new())
    }

    #[fixture]
    fn service(notifier: Arc<BroadcastNotifier>) -> TestService {
        SettingsService::new(Arc::new(InMemorySettingsStore::new()), notifier)
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn load_falls_back_to_defaults(service: TestService) {
        let settings = service.load().await.expect("load should succeed");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.auto_save);
        assert!(!settings.notifications);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn update_persists_and_broadcasts(notifier: Arc<BroadcastNotifier>) {
        let service: TestService =
            SettingsService::new(Arc::new(InMemorySettingsStore::new()), Arc::clone(&notifier));
        let mut receiver = notifier.subscribe();

        let updated = Settings {
            theme: Theme::Light,
            ..Settings::default()
        };
        service
            .update(updated.clone())
            .await
            .expect("update should succeed");

        assert_eq!(
            service.load().await.expect("load should succeed"),
            updated
        );
        let event = receiver.recv().await.expect("event should be broadcast");
        assert_eq!(
            event,
            PlannerEvent::SettingsUpdated { settings: updated }
        );
    }
}
