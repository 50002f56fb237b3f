//! Guarded frontend generation workflow with a bounded retry loop.

use forge_core::llm::{LlmProvider, MockLlmProvider};
use forge_core::{
    Error, ForgeConfig, FrontendState, GuardrailVerdict, PipelineStatus, Result, RetryDecision,
    StepId, StepMetadata, WorkflowId,
};
use forge_steps::{
    CodeValidator, CodegenStep, DesignStep, Designer, Guardrail, OFFLINE_LOGIN_FORM, Step,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::events::{EventSink, PipelineEvent};
use crate::routing::{MAX_RETRIES, RouteDecision, should_proceed, should_retry};

/// Input for the frontend workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendInput {
    /// Unique workflow ID
    pub workflow_id: WorkflowId,

    /// Natural-language frontend request
    pub user_request: String,

    /// Optional custom retry budget (defaults to the workflow's)
    pub max_retries: Option<u32>,
}

impl FrontendInput {
    /// Creates a new workflow input.
    pub fn new(user_request: impl Into<String>) -> Self {
        Self {
            workflow_id: WorkflowId::new(),
            user_request: user_request.into(),
            max_retries: None,
        }
    }

    /// Sets a custom retry budget.
    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = Some(max);
        self
    }
}

/// Output from the frontend workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendOutput {
    /// Workflow ID
    pub workflow_id: WorkflowId,

    /// Terminal status: `Passed`, `TestsFailed`, or `Blocked`
    pub status: PipelineStatus,

    /// Guardrail decision
    pub guardrail: GuardrailVerdict,

    /// Final pipeline state
    pub state: FrontendState,

    /// One record per stage execution, in order
    pub steps: Vec<StepMetadata>,
}

impl FrontendOutput {
    /// Returns `true` if the generated code passed validation.
    pub fn is_passed(&self) -> bool {
        self.status == PipelineStatus::Passed
    }

    /// The block message, for blocked requests.
    pub fn blocked_reason(&self) -> Option<&str> {
        match self.status {
            PipelineStatus::Blocked => self.state.error.as_deref(),
            _ => None,
        }
    }

    /// The final test report rendered as text, if the test stage ran.
    pub fn final_result(&self) -> Option<String> {
        self.state.test_result()
    }

    /// Number of times a stage ran.
    pub fn step_count(&self, step: &StepId) -> usize {
        self.steps.iter().filter(|m| &m.step_id == step).count()
    }

    /// Converts non-passing outcomes into errors.
    pub fn into_result(self) -> Result<FrontendState> {
        match self.status {
            PipelineStatus::Passed => Ok(self.state),
            PipelineStatus::Blocked => match self.guardrail {
                GuardrailVerdict::Blocked { keyword } => Err(Error::blocked(keyword)),
                GuardrailVerdict::Passed => {
                    Err(Error::validation("blocked run without a block verdict"))
                }
            },
            _ => Err(Error::MaxRetriesExceeded {
                attempts: self.state.retry_count,
            }),
        }
    }
}

/// The guardrail → design → codegen → test → retry workflow.
#[derive(Clone)]
pub struct FrontendWorkflow {
    guardrail: Guardrail,
    design: DesignStep,
    codegen: CodegenStep,
    validator: CodeValidator,
    max_retries: u32,
    events: EventSink,
}

impl FrontendWorkflow {
    /// Creates a workflow with default stages around `llm`.
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            guardrail: Guardrail::default(),
            design: DesignStep::default(),
            codegen: CodegenStep::new(llm),
            validator: CodeValidator::default(),
            max_retries: MAX_RETRIES,
            events: EventSink::default(),
        }
    }

    /// Creates a workflow whose stages follow `config`.
    pub fn from_config(llm: Arc<dyn LlmProvider>, config: &ForgeConfig) -> Self {
        Self {
            guardrail: Guardrail::from_config(&config.guardrail),
            design: DesignStep::default(),
            codegen: CodegenStep::new(llm).with_max_tokens(config.llm.max_tokens),
            validator: CodeValidator::from_config(&config.validation),
            max_retries: config.pipeline.max_retries,
            events: EventSink::default(),
        }
    }

    /// Creates a workflow whose codegen always returns the canned login form.
    pub fn offline() -> Self {
        Self::new(Arc::new(MockLlmProvider::with_response(OFFLINE_LOGIN_FORM)))
    }

    /// Replaces the designer.
    pub fn with_designer(mut self, designer: Arc<dyn Designer>) -> Self {
        self.design = DesignStep::new(designer);
        self
    }

    /// Replaces the guardrail.
    pub fn with_guardrail(mut self, guardrail: Guardrail) -> Self {
        self.guardrail = guardrail;
        self
    }

    /// Replaces the validator.
    pub fn with_validator(mut self, validator: CodeValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Sets the default retry budget.
    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Streams progress events to `sender`.
    pub fn with_events(mut self, sender: mpsc::UnboundedSender<PipelineEvent>) -> Self {
        self.events = EventSink::new(sender);
        self
    }

    /// Runs the workflow.
    ///
    /// Blocked requests and exhausted retries are normal outcomes reported in
    /// [`FrontendOutput::status`]; `Err` means a stage itself failed.
    pub async fn run(&self, input: FrontendInput) -> Result<FrontendOutput> {
        let max_retries = input.max_retries.unwrap_or(self.max_retries);
        let workflow_id = input.workflow_id;

        tracing::info!(
            workflow_id = %workflow_id,
            request = %input.user_request,
            max_retries,
            "Starting frontend workflow"
        );
        self.events.emit(PipelineEvent::Started {
            workflow_id,
            user_request: input.user_request.clone(),
            max_retries,
        });

        match self.execute(input, max_retries).await {
            Ok(output) => {
                tracing::info!(
                    workflow_id = %workflow_id,
                    status = %output.status,
                    retries = output.state.retry_count,
                    "Frontend workflow completed"
                );
                self.events.emit(PipelineEvent::Finished {
                    status: output.status,
                });
                Ok(output)
            }
            Err(e) => {
                tracing::error!(workflow_id = %workflow_id, error = %e, "Frontend workflow failed");
                self.events.emit(PipelineEvent::Finished {
                    status: PipelineStatus::Failed,
                });
                Err(e)
            }
        }
    }

    async fn execute(&self, input: FrontendInput, max_retries: u32) -> Result<FrontendOutput> {
        let mut steps = Vec::new();
        let state = FrontendState::new(input.user_request);

        // Step 1: Guardrail
        let mut state = self.run_step(&self.guardrail, state, 1, &mut steps).await?;
        let verdict = state
            .guardrail_verdict()
            .ok_or_else(|| Error::validation("guardrail stage did not record a verdict"))?;

        if should_proceed(&state) == RouteDecision::Blocked {
            let keyword = verdict.keyword().unwrap_or_default().to_string();
            let reason = state.error.clone().unwrap_or_default();
            self.events.emit(PipelineEvent::GuardrailBlocked { keyword, reason });
            steps.push(self.mark(StepId::blocked(), 1));
            return Ok(FrontendOutput {
                workflow_id: input.workflow_id,
                status: PipelineStatus::Blocked,
                guardrail: verdict,
                state,
                steps,
            });
        }
        self.events.emit(PipelineEvent::GuardrailPassed);

        // Step 2: Design
        state = self.run_step(&self.design, state, 1, &mut steps).await?;
        self.events.emit(PipelineEvent::DesignReady);

        // Steps 3-4: Codegen and test, with bounded retries
        loop {
            let attempt = state.retry_count + 1;

            state = self.run_step(&self.codegen, state, attempt, &mut steps).await?;
            match (&state.generated_code, &state.error) {
                (Some(code), _) => self.events.emit(PipelineEvent::CodeGenerated {
                    attempt,
                    bytes: code.len(),
                }),
                (None, error) => self.events.emit(PipelineEvent::CodegenFailed {
                    attempt,
                    error: error.clone().unwrap_or_default(),
                }),
            }

            state = self.run_step(&self.validator, state, attempt, &mut steps).await?;
            if state.tests_passed() {
                self.events.emit(PipelineEvent::TestPassed);
            } else {
                self.events.emit(PipelineEvent::TestFailed {
                    attempt,
                    report: state.test_result().unwrap_or_default(),
                });
            }

            match should_retry(&state, max_retries) {
                RetryDecision::Done => break,
                RetryDecision::Retry { attempt } => {
                    tracing::info!(
                        workflow_id = %input.workflow_id,
                        attempt,
                        max_retries,
                        "Retrying code generation"
                    );
                    self.events.emit(PipelineEvent::Retrying {
                        attempt,
                        max_retries,
                    });
                    steps.push(self.mark(StepId::increment_retry(), attempt));
                    state.retry_count += 1;
                }
            }
        }

        let status = if state.tests_passed() {
            PipelineStatus::Passed
        } else {
            self.events
                .emit(PipelineEvent::MaxRetriesReached { max_retries });
            PipelineStatus::TestsFailed
        };

        Ok(FrontendOutput {
            workflow_id: input.workflow_id,
            status,
            guardrail: verdict,
            state,
            steps,
        })
    }

    async fn run_step(
        &self,
        step: &dyn Step,
        state: FrontendState,
        attempt: u32,
        steps: &mut Vec<StepMetadata>,
    ) -> Result<FrontendState> {
        let step_id = step.id();
        let mut metadata = StepMetadata::for_attempt(step_id.clone(), attempt);
        self.events.emit(PipelineEvent::StepStarted {
            step: step_id.clone(),
            attempt,
        });

        let tokens_before = state.tokens_used;
        let state = step.run(state).await?;

        metadata.mark_completed();
        let tokens = state.tokens_used.saturating_sub(tokens_before);
        if tokens > 0 {
            metadata.llm_tokens_used = Some(tokens);
        }
        self.events.emit(PipelineEvent::StepCompleted {
            step: step_id,
            attempt,
            duration_ms: metadata
                .duration()
                .map(|d| d.num_milliseconds())
                .unwrap_or_default(),
        });
        steps.push(metadata);
        Ok(state)
    }

    /// Records a bookkeeping stage that has no work of its own.
    fn mark(&self, step_id: StepId, attempt: u32) -> StepMetadata {
        self.events.emit(PipelineEvent::StepStarted {
            step: step_id.clone(),
            attempt,
        });
        let mut metadata = StepMetadata::for_attempt(step_id.clone(), attempt);
        metadata.mark_completed();
        self.events.emit(PipelineEvent::StepCompleted {
            step: step_id,
            attempt,
            duration_ms: 0,
        });
        metadata
    }
}
