//! Adapter implementations of the planner ports.

pub mod memory;
pub mod sqlite;
