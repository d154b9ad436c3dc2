//! Day-bucketed task planning for Triday.
//!
//! This module implements the planner core: durable CRUD over tasks and the
//! current-project record, the daily rollover and overdue-promotion policy
//! that moves tasks between the three day buckets, and display ordering for
//! UI surfaces. The module follows hexagonal architecture:
//!
//! - Domain types and pure policy in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
