//! Embedded `SQLite` adapters for planner persistence.

mod models;
mod repository;
mod schema;

pub use repository::{SqlitePlannerStore, SqlitePool};
