//! In-memory planner store for tests and the degraded fallback path.

mod planner;

pub use planner::InMemoryPlannerStore;
