//! User settings blob and its store.
//!
//! Settings are a small key-value blob read and written independently of
//! the task store. Updates are broadcast to observers as
//! `SETTINGS_UPDATED` events.

mod model;
mod service;
mod store;

pub use model::{SETTINGS_VERSION, Settings, Theme};
pub use service::SettingsService;
pub use store::{InMemorySettingsStore, SettingsError, SettingsResult, SettingsStore};
