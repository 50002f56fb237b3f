//! HTML/CSS generation from the design spec.

use async_trait::async_trait;
use forge_core::llm::{CompletionRequest, DEFAULT_MAX_TOKENS, LlmProvider, Message};
use forge_core::{Error, FrontendState, Result, StepId};
use std::sync::Arc;

use crate::step::Step;

/// Canned output served when no API key is configured.
pub const OFFLINE_LOGIN_FORM: &str = "\
<form class='login-form'>
  <input type='email' placeholder='Email' />
  <input type='password' placeholder='Password' />
  <button type='submit'>Login</button>
</form>
";

const SYSTEM_PROMPT: &str = "You are a frontend engineer. You write clean, accessible HTML and CSS.";

/// Stage that asks the LLM for code built from `design_spec`.
///
/// A failed provider call does not abort the run: the error is recorded in
/// `state.error`, the previous code is cleared, and the test stage reports
/// that nothing was generated so the retry loop can try again.
#[derive(Clone)]
pub struct CodegenStep {
    llm: Arc<dyn LlmProvider>,
    max_tokens: u32,
}

impl CodegenStep {
    /// Creates a codegen stage using `llm`.
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            llm,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Sets the completion budget per attempt.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Builds the codegen request for the current state.
    pub fn build_request(&self, state: &FrontendState) -> Result<CompletionRequest> {
        let design = state
            .design_spec
            .as_deref()
            .ok_or_else(|| Error::validation_field("design_spec", "design must run before codegen"))?;

        let mut prompt = format!(
            "Based on this UI design spec, generate clean HTML + CSS code.\n\
             Only output the code, no explanation.\n\n\
             Design spec:\n{design}"
        );
        if state.retry_count > 0
            && let Some(report) = state.test_report.as_ref().filter(|r| !r.passed())
        {
            prompt.push_str(&format!(
                "\n\nThe previous attempt failed validation ({report}). Fix these issues."
            ));
        }

        Ok(CompletionRequest::new(vec![Message::user(prompt)])
            .with_system_prompt(SYSTEM_PROMPT)
            .with_max_tokens(self.max_tokens))
    }
}

#[async_trait]
impl Step for CodegenStep {
    fn id(&self) -> StepId {
        StepId::codegen()
    }

    async fn run(&self, mut state: FrontendState) -> Result<FrontendState> {
        let request = self.build_request(&state)?;
        let attempt = state.retry_count + 1;

        tracing::info!(attempt, provider = self.llm.name(), "Generating code from design spec");

        match self.llm.complete(request).await {
            Ok(response) => {
                let code = extract_code(&response.content);
                tracing::info!(
                    attempt,
                    tokens = response.tokens_used.total(),
                    bytes = code.len(),
                    "Code generated"
                );
                state.tokens_used += response.tokens_used.total();
                state.generated_code = Some(code);
                state.error = None;
            }
            Err(e) => {
                tracing::error!(attempt, error = %e, "Code generation failed");
                state.generated_code = None;
                state.error = Some(e.to_string());
            }
        }
        Ok(state)
    }
}

/// Strips a surrounding Markdown code fence, if the model added one.
pub fn extract_code(content: &str) -> String {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    // Drop the info string (```html) on the opening line.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => return trimmed.to_string(),
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim().to_string()
}
