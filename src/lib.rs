//! Triday: day-bucketed task planner core.
//!
//! This crate provides the core of a three-day task planner: a durable task
//! store partitioned into today / tomorrow / day-after-tomorrow buckets, a
//! rollover engine that advances tasks across day boundaries, an overdue
//! classifier, and a change notifier that fans out authoritative state
//! snapshots to interested observers.
//!
//! # Architecture
//!
//! Triday follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, channels)
//!
//! # Modules
//!
//! - [`planner`]: Task store, rollover engine, and overdue classification
//! - [`notify`]: Change notification port and broadcast adapter
//! - [`settings`]: User settings blob and its store
//! - [`backup`]: Versioned export/import of all persisted state

pub mod backup;
pub mod notify;
pub mod planner;
pub mod settings;
