//! UI design spec generation.

use async_trait::async_trait;
use forge_core::{FrontendState, Result, StepId};
use std::sync::Arc;

use crate::step::Step;

/// Produces a UI design spec for a request.
#[async_trait]
pub trait Designer: Send + Sync {
    /// Describes the UI that should be built for `request`.
    async fn design(&self, request: &str) -> Result<String>;
}

/// Deterministic designer that fills a fixed login-form template.
///
/// Stands in for a real design tool; the spec it emits is what the codegen
/// prompt is built from.
#[derive(Debug, Clone, Default)]
pub struct TemplateDesigner;

#[async_trait]
impl Designer for TemplateDesigner {
    async fn design(&self, request: &str) -> Result<String> {
        Ok(format!(
            "Design spec for: {request}\n\
             - Layout: centered login form\n\
             - Components: email input, password input, submit button\n\
             - Colors: #FFFFFF background, #2563EB primary button\n\
             - Font: Inter 16px\n"
        ))
    }
}

/// Stage that stores the designer's output in `design_spec`.
#[derive(Clone)]
pub struct DesignStep {
    designer: Arc<dyn Designer>,
}

impl Default for DesignStep {
    fn default() -> Self {
        Self::new(Arc::new(TemplateDesigner))
    }
}

impl DesignStep {
    /// Creates a design stage backed by `designer`.
    pub fn new(designer: Arc<dyn Designer>) -> Self {
        Self { designer }
    }
}

#[async_trait]
impl Step for DesignStep {
    fn id(&self) -> StepId {
        StepId::design()
    }

    async fn run(&self, mut state: FrontendState) -> Result<FrontendState> {
        tracing::info!(request = %state.user_request, "Designing UI");
        let spec = self.designer.design(&state.user_request).await?;
        tracing::debug!(lines = spec.lines().count(), "Design spec ready");
        state.design_spec = Some(spec);
        Ok(state)
    }
}
