//! Unit and service tests for the planner core.

mod overdue_tests;
mod rollover_plan_tests;
mod support;
mod trigger_tests;
