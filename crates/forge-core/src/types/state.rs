//! Shared state threaded through every pipeline stage.

use serde::{Deserialize, Serialize};

use crate::types::{GuardrailVerdict, TestReport};

/// State handed from stage to stage.
///
/// Each stage takes the state by value and returns the updated state.
/// Optional fields are `None` until the stage that owns them has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontendState {
    /// The natural-language frontend request
    pub user_request: String,

    /// UI design spec produced by the design stage
    pub design_spec: Option<String>,

    /// Code produced by the most recent codegen attempt
    pub generated_code: Option<String>,

    /// Report from the most recent test stage
    pub test_report: Option<TestReport>,

    /// Guardrail outcome; `None` before the guardrail runs
    pub guardrail_passed: Option<bool>,

    /// Keyword that blocked the request, when the guardrail blocked it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_keyword: Option<String>,

    /// Number of retries taken so far
    pub retry_count: u32,

    /// Last error message (guardrail block or provider failure)
    pub error: Option<String>,

    /// LLM tokens consumed across all codegen attempts
    pub tokens_used: u64,
}

impl FrontendState {
    /// Creates the initial state for a request.
    pub fn new(user_request: impl Into<String>) -> Self {
        Self {
            user_request: user_request.into(),
            design_spec: None,
            generated_code: None,
            test_report: None,
            guardrail_passed: None,
            blocked_keyword: None,
            retry_count: 0,
            error: None,
            tokens_used: 0,
        }
    }

    /// Returns `true` if the latest test report passed.
    pub fn tests_passed(&self) -> bool {
        self.test_report.as_ref().is_some_and(TestReport::passed)
    }

    /// The guardrail's decision as recorded by the guardrail stage.
    pub fn guardrail_verdict(&self) -> Option<GuardrailVerdict> {
        match self.guardrail_passed? {
            true => Some(GuardrailVerdict::Passed),
            false => Some(GuardrailVerdict::Blocked {
                keyword: self.blocked_keyword.clone().unwrap_or_default(),
            }),
        }
    }

    /// The latest test report rendered as text, if any.
    pub fn test_result(&self) -> Option<String> {
        self.test_report.as_ref().map(ToString::to_string)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = FrontendState::new("Build a login page with email and password");
        assert_eq!(state.user_request, "Build a login page with email and password");
        assert!(state.design_spec.is_none());
        assert!(state.generated_code.is_none());
        assert!(state.test_report.is_none());
        assert!(state.guardrail_passed.is_none());
        assert_eq!(state.retry_count, 0);
        assert!(state.error.is_none());
        assert!(!state.tests_passed());
        assert_eq!(state.test_result(), None);
    }

    #[test]
    fn test_tests_passed_follows_report() {
        let mut state = FrontendState::new("x");
        state.test_report = Some(TestReport::with_issues(["Missing form element"]));
        assert!(!state.tests_passed());
        assert_eq!(
            state.test_result().unwrap(),
            "FAILED: Missing form element"
        );

        state.test_report = Some(TestReport::passing());
        assert!(state.tests_passed());
        assert_eq!(state.test_result().unwrap(), "All tests passed");
    }

    #[test]
    fn test_guardrail_verdict_from_state() {
        let mut state = FrontendState::new("x");
        assert_eq!(state.guardrail_verdict(), None);

        state.guardrail_passed = Some(true);
        assert_eq!(state.guardrail_verdict(), Some(GuardrailVerdict::Passed));

        state.guardrail_passed = Some(false);
        state.blocked_keyword = Some("hack".to_string());
        assert_eq!(
            state.guardrail_verdict(),
            Some(GuardrailVerdict::Blocked {
                keyword: "hack".to_string()
            })
        );
    }

    #[test]
    fn test_state_serialization() {
        let mut state = FrontendState::new("Build a signup form");
        state.retry_count = 1;
        state.test_report = Some(TestReport::no_code());
        let json = serde_json::to_string(&state).unwrap();
        let back: FrontendState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
