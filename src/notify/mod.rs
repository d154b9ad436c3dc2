//! Change notification for planner and settings state.
//!
//! The planner guarantees that every successful state-changing mutation
//! publishes exactly one event carrying the resulting authoritative
//! snapshot. Delivery is fire-and-forget: observers that are gone are
//! silently ignored, and a failed publish never rolls back or fails the
//! underlying mutation.

mod broadcast;

pub use broadcast::{BroadcastNotifier, NullNotifier};

use crate::planner::domain::PlannerSnapshot;
use crate::settings::Settings;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Events broadcast to UI surfaces after state changes.
///
/// Serializes to the tagged wire shape the surfaces consume, e.g.
/// `{"type": "TASKS_UPDATED", "currentProject": ..., "today": [...], ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlannerEvent {
    /// Task or project state changed; carries the full snapshot.
    TasksUpdated {
        /// Authoritative planner state after the mutation.
        #[serde(flatten)]
        snapshot: PlannerSnapshot,
    },
    /// The settings blob changed.
    SettingsUpdated {
        /// Settings after the update.
        settings: Settings,
    },
}

/// Fan-out contract for state-change events.
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    /// Publishes an event to all current observers, best-effort.
    async fn notify(&self, event: PlannerEvent);
}
