//! Versioned export and import of all persisted state.
//!
//! The export document is a full dump of the persistence boundary: every
//! task, the current project, and the settings blob, wrapped with a version
//! and a timestamp. Import replaces all persisted state wholesale.

mod service;

pub use service::{BackupData, BackupError, BackupService, ExportDocument, backup_file_name};

/// Version written into new export documents.
pub const EXPORT_VERSION: &str = "2.0.0";
