//! The settings blob shared by all UI surfaces.

use serde::{Deserialize, Serialize};

/// Settings schema version written with new blobs.
pub const SETTINGS_VERSION: &str = "2.0.0";

/// UI colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme (the default).
    Dark,
    /// Light theme.
    Light,
}

/// The settings blob persisted for all UI surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// UI colour theme.
    pub theme: Theme,
    /// Whether edits save without an explicit action.
    pub auto_save: bool,
    /// Whether desktop notifications are enabled.
    pub notifications: bool,
    /// Whether the current project is shown on the new-tab page.
    pub project_visibility: bool,
    /// Schema version the blob was written with.
    pub version: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            auto_save: true,
            notifications: false,
            project_visibility: false,
            version: SETTINGS_VERSION.to_owned(),
        }
    }
}
