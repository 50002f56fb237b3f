//! Conditional edges of the frontend workflow.

use forge_core::{FrontendState, RetryDecision};
use serde::{Deserialize, Serialize};

/// Default number of codegen retries after a failed test.
pub const MAX_RETRIES: u32 = forge_core::config::DEFAULT_MAX_RETRIES;

/// Where to go after the guardrail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    /// Continue to design
    Proceed,
    /// Stop at the blocked stage
    Blocked,
}

/// Routes after the guardrail. Anything but an explicit pass is blocked.
pub fn should_proceed(state: &FrontendState) -> RouteDecision {
    if state.guardrail_passed == Some(true) {
        RouteDecision::Proceed
    } else {
        RouteDecision::Blocked
    }
}

/// Routes after the test stage.
pub fn should_retry(state: &FrontendState, max_retries: u32) -> RetryDecision {
    if state.tests_passed() {
        return RetryDecision::Done;
    }
    if state.retry_count >= max_retries {
        tracing::warn!(max_retries, "Max retries reached, stopping");
        return RetryDecision::Done;
    }
    RetryDecision::Retry {
        attempt: state.retry_count + 1,
    }
}
