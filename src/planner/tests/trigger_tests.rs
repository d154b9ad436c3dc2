//! Day-boundary guard tests.

use super::support::instant;
use crate::planner::services::DayBoundaryGuard;
use rstest::rstest;

#[rstest]
fn fresh_guard_fires_on_the_first_check() {
    let guard = DayBoundaryGuard::new();
    assert!(guard.should_run(instant(2025, 6, 1, 0, 0, 0)));
}

#[rstest]
fn guard_suppresses_reruns_within_the_same_day() {
    let mut guard = DayBoundaryGuard::new();
    let morning = instant(2025, 6, 1, 0, 5, 0);
    guard.mark_ran(morning);

    assert!(!guard.should_run(morning));
    assert!(!guard.should_run(instant(2025, 6, 1, 23, 59, 59)));
}

#[rstest]
fn guard_fires_again_once_the_date_changes() {
    let mut guard = DayBoundaryGuard::seeded(instant(2025, 6, 1, 12, 0, 0));

    assert!(!guard.should_run(instant(2025, 6, 1, 23, 0, 0)));
    assert!(guard.should_run(instant(2025, 6, 2, 0, 1, 0)));

    guard.mark_ran(instant(2025, 6, 2, 0, 1, 0));
    assert!(!guard.should_run(instant(2025, 6, 2, 18, 0, 0)));
    assert!(guard.should_run(instant(2025, 6, 3, 0, 0, 0)));
}
