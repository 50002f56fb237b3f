//! Keyword guardrail that runs before any generation.

use async_trait::async_trait;
use forge_core::config::{DEFAULT_BLOCKED_KEYWORDS, GuardrailConfig};
use forge_core::{FrontendState, GuardrailVerdict, Result, StepId};

use crate::step::Step;

/// Blocks requests that contain a dangerous keyword.
///
/// Matching is a case-insensitive substring search over the keyword list in
/// order; the first hit is reported.
#[derive(Debug, Clone)]
pub struct Guardrail {
    keywords: Vec<String>,
}

impl Default for Guardrail {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKED_KEYWORDS.iter().copied())
    }
}

impl Guardrail {
    /// Creates a guardrail over the given keywords.
    ///
    /// Keywords are trimmed and lowercased; blank entries are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Creates a guardrail from configuration.
    pub fn from_config(config: &GuardrailConfig) -> Self {
        Self::new(config.keywords())
    }

    /// The normalized keyword list.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Checks a request.
    pub fn check(&self, request: &str) -> GuardrailVerdict {
        let request = request.to_lowercase();
        match self.keywords.iter().find(|k| request.contains(k.as_str())) {
            Some(keyword) => GuardrailVerdict::Blocked {
                keyword: keyword.clone(),
            },
            None => GuardrailVerdict::Passed,
        }
    }
}

#[async_trait]
impl Step for Guardrail {
    fn id(&self) -> StepId {
        StepId::guardrail()
    }

    async fn run(&self, mut state: FrontendState) -> Result<FrontendState> {
        match self.check(&state.user_request) {
            GuardrailVerdict::Passed => {
                tracing::info!("Guardrail passed");
                state.guardrail_passed = Some(true);
            }
            verdict @ GuardrailVerdict::Blocked { .. } => {
                tracing::warn!(keyword = ?verdict.keyword(), "Guardrail blocked request");
                state.guardrail_passed = Some(false);
                state.error = verdict.reason();
                state.blocked_keyword = verdict.keyword().map(str::to_string);
            }
        }
        Ok(state)
    }
}
