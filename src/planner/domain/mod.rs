//! Domain model for day-bucketed task planning.
//!
//! The planner domain models task records, their placement in the three day
//! buckets, the current-project singleton, overdue classification, and the
//! pure rollover policy while keeping all infrastructure concerns outside of
//! the domain boundary.

mod day;
mod error;
mod ids;
mod overdue;
mod project;
mod rollover;
mod snapshot;
mod task;
mod time;

pub use day::{DayBucket, ParseDayBucketError};
pub use error::PlannerDomainError;
pub use ids::TaskId;
pub use overdue::{due_instant, is_overdue};
pub use project::{PROJECT_KEY, Project};
pub use rollover::{MoveReason, PlannedMove, RolloverPlan, plan_daily_rollover, plan_overdue_promotion};
pub use snapshot::{GroupedTasks, PlannerSnapshot, sort_for_display};
pub use task::{PersistedTaskData, Task, TaskPatch, TaskText};
pub use time::TaskTime;
