//! Structural validation of generated code.

use async_trait::async_trait;
use forge_core::config::{RuleConfig, ValidationConfig};
use forge_core::{FrontendState, Result, StepId, TestReport};
use serde::{Deserialize, Serialize};

use crate::step::Step;

/// A requirement on generated code.
///
/// The rule passes when the lowercased code contains any of `any_of`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Issue reported when the rule fails
    pub issue: String,
    /// Lowercased needles
    pub any_of: Vec<String>,
}

impl ValidationRule {
    /// Creates a rule; needles are lowercased.
    pub fn new<I, S>(issue: impl Into<String>, any_of: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            issue: issue.into(),
            any_of: any_of
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn is_satisfied_by(&self, lowercase_code: &str) -> bool {
        self.any_of.iter().any(|n| lowercase_code.contains(n.as_str()))
    }
}

impl From<&RuleConfig> for ValidationRule {
    fn from(rule: &RuleConfig) -> Self {
        Self::new(rule.issue.clone(), &rule.any_of)
    }
}

/// Test stage: checks code against an ordered rule list.
#[derive(Debug, Clone)]
pub struct CodeValidator {
    rules: Vec<ValidationRule>,
}

impl Default for CodeValidator {
    fn default() -> Self {
        Self::from_config(&ValidationConfig::default())
    }
}

impl CodeValidator {
    /// Creates a validator with explicit rules.
    pub fn new(rules: Vec<ValidationRule>) -> Self {
        Self { rules }
    }

    /// Creates a validator from configuration.
    pub fn from_config(config: &ValidationConfig) -> Self {
        Self::new(config.rules.iter().map(ValidationRule::from).collect())
    }

    /// The rules, in check order.
    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    /// Validates `code`. Absent or blank code fails with a single issue.
    pub fn validate(&self, code: Option<&str>) -> TestReport {
        let Some(code) = code.filter(|c| !c.trim().is_empty()) else {
            return TestReport::no_code();
        };
        let lowercase = code.to_lowercase();
        TestReport::with_issues(
            self.rules
                .iter()
                .filter(|rule| !rule.is_satisfied_by(&lowercase))
                .map(|rule| rule.issue.clone()),
        )
    }
}

#[async_trait]
impl Step for CodeValidator {
    fn id(&self) -> StepId {
        StepId::test()
    }

    async fn run(&self, mut state: FrontendState) -> Result<FrontendState> {
        tracing::info!(attempt = state.retry_count + 1, "Validating generated code");
        let report = self.validate(state.generated_code.as_deref());
        if report.passed() {
            tracing::info!("Validation passed");
        } else {
            tracing::warn!(result = %report, "Validation failed");
        }
        state.test_report = Some(report);
        Ok(state)
    }
}
