//! Outcomes of the guardrail and validation stages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary line of a passing test report.
pub const ALL_TESTS_PASSED: &str = "All tests passed";

/// Issue reported when there is no code to validate.
pub const NO_CODE_GENERATED: &str = "No code was generated";

/// Builds the message shown when the guardrail blocks a request.
pub fn block_message(keyword: &str) -> String {
    format!("Request blocked by guardrail: '{keyword}' is not allowed.")
}

/// Decision from the guardrail stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum GuardrailVerdict {
    /// Request is safe to execute
    Passed,

    /// Request contains a dangerous keyword
    Blocked {
        /// The first matching keyword
        keyword: String,
    },
}

impl GuardrailVerdict {
    /// Returns `true` if the request may proceed.
    pub fn is_passed(&self) -> bool {
        matches!(self, GuardrailVerdict::Passed)
    }

    /// Returns the matching keyword for a blocked request.
    pub fn keyword(&self) -> Option<&str> {
        match self {
            GuardrailVerdict::Blocked { keyword } => Some(keyword),
            GuardrailVerdict::Passed => None,
        }
    }

    /// Returns the user-facing block message for a blocked request.
    pub fn reason(&self) -> Option<String> {
        self.keyword().map(block_message)
    }
}

/// Result of validating generated code.
///
/// Renders as `All tests passed` or `FAILED: <issue>, <issue>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    issues: Vec<String>,
}

impl TestReport {
    /// A report with no issues.
    pub fn passing() -> Self {
        Self::default()
    }

    /// A report listing the given issues, in order.
    pub fn with_issues<I, S>(issues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            issues: issues.into_iter().map(Into::into).collect(),
        }
    }

    /// The report for absent or empty code.
    pub fn no_code() -> Self {
        Self::with_issues([NO_CODE_GENERATED])
    }

    /// Returns `true` when no issue was found.
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    /// The issues found, in rule order.
    pub fn issues(&self) -> &[String] {
        &self.issues
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            write!(f, "{ALL_TESTS_PASSED}")
        } else {
            write!(f, "FAILED: {}", self.issues.join(", "))
        }
    }
}
