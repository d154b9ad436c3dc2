//! Port contracts for the planner core.
//!
//! Ports define infrastructure-agnostic interfaces used by planner services.

pub mod repository;

pub use repository::{ProjectRepository, StoreError, StoreResult, TaskRepository};
