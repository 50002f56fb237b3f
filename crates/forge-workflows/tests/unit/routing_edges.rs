//! Routing edge cases.

use forge_core::{FrontendState, RetryDecision, TestReport};
use forge_workflows::{MAX_RETRIES, RouteDecision, should_proceed, should_retry};

#[test]
fn test_default_budget_is_two() {
    assert_eq!(MAX_RETRIES, 2);
}

#[test]
fn test_unset_guardrail_blocks() {
    assert_eq!(
        should_proceed(&FrontendState::new("anything")),
        RouteDecision::Blocked
    );
}

#[test]
fn test_passing_report_ends_loop_regardless_of_count() {
    let mut state = FrontendState::new("x");
    state.test_report = Some(TestReport::passing());
    state.retry_count = 99;
    assert_eq!(should_retry(&state, 2), RetryDecision::Done);
}

#[test]
fn test_count_above_budget_is_done() {
    let mut state = FrontendState::new("x");
    state.test_report = Some(TestReport::no_code());
    state.retry_count = 5;
    assert_eq!(should_retry(&state, 2), RetryDecision::Done);
}
