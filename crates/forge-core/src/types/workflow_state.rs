//! Pipeline status and per-step execution records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::StepId;

/// How a pipeline run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PipelineStatus {
    /// Generated code passed validation.
    Passed,

    /// Generated code still failed validation when the retry budget ran out.
    TestsFailed,

    /// The guardrail rejected the request.
    Blocked,

    /// The run aborted with an error.
    Failed,
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStatus::Passed => write!(f, "passed"),
            PipelineStatus::TestsFailed => write!(f, "tests_failed"),
            PipelineStatus::Blocked => write!(f, "blocked"),
            PipelineStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Metadata about a single stage execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepMetadata {
    /// Stage that ran
    pub step_id: StepId,

    /// When this stage started executing
    pub started_at: DateTime<Utc>,

    /// When this stage completed (if finished)
    pub completed_at: Option<DateTime<Utc>>,

    /// Attempt number (1-indexed); codegen and test increase on retries
    pub attempt: u32,

    /// Number of LLM tokens used (if applicable)
    pub llm_tokens_used: Option<u64>,
}

impl StepMetadata {
    /// Creates step metadata for the first attempt of a stage.
    pub fn new(step_id: StepId) -> Self {
        Self::for_attempt(step_id, 1)
    }

    /// Creates step metadata for a specific attempt.
    pub fn for_attempt(step_id: StepId, attempt: u32) -> Self {
        Self {
            step_id,
            started_at: Utc::now(),
            completed_at: None,
            attempt,
            llm_tokens_used: None,
        }
    }

    /// Marks this stage as completed.
    pub fn mark_completed(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Returns the duration of this stage execution.
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.completed_at
            .map(|end| end.signed_duration_since(self.started_at))
    }

    /// Returns `true` if the stage has completed.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
