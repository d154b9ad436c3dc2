//! Broadcast-channel adapter for the change notifier port.

use super::{ChangeNotifier, PlannerEvent};
use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

const DEFAULT_CAPACITY: usize = 16;

/// Change notifier fanning events out over a tokio broadcast channel.
///
/// Observers subscribe for a receiver and drop it to unsubscribe; sends to
/// a channel with no live receivers are ignored.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<PlannerEvent>,
}

impl BroadcastNotifier {
    /// Creates a notifier with the default per-observer buffer capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a notifier buffering up to `capacity` events per observer.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Registers a new observer.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PlannerEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of currently registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChangeNotifier for BroadcastNotifier {
    async fn notify(&self, event: PlannerEvent) {
        if self.sender.send(event).is_err() {
            debug!("no observers registered, dropping event");
        }
    }
}

/// Notifier that discards every event, for contexts with no observers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

#[async_trait]
impl ChangeNotifier for NullNotifier {
    async fn notify(&self, _event: PlannerEvent) {}
}
