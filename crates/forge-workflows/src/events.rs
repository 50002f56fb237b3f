//! Progress events emitted while a pipeline runs.

use forge_core::{PipelineStatus, StepId, WorkflowId};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Everything a front end needs to render a live transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// A run began
    Started {
        /// Run identifier
        workflow_id: WorkflowId,
        /// The request being processed
        user_request: String,
        /// Retry budget for this run
        max_retries: u32,
    },

    /// A stage began
    StepStarted {
        /// Stage name
        step: StepId,
        /// Attempt number (1-indexed)
        attempt: u32,
    },

    /// A stage finished
    StepCompleted {
        /// Stage name
        step: StepId,
        /// Attempt number (1-indexed)
        attempt: u32,
        /// Wall-clock time spent in the stage
        duration_ms: i64,
    },

    /// The guardrail let the request through
    GuardrailPassed,

    /// The guardrail rejected the request
    GuardrailBlocked {
        /// Matching keyword
        keyword: String,
        /// Block message
        reason: String,
    },

    /// A design spec was produced
    DesignReady,

    /// Codegen produced code
    CodeGenerated {
        /// Attempt number (1-indexed)
        attempt: u32,
        /// Size of the extracted code
        bytes: usize,
    },

    /// The provider call failed; the run continues into test
    CodegenFailed {
        /// Attempt number (1-indexed)
        attempt: u32,
        /// Provider error text
        error: String,
    },

    /// Validation passed
    TestPassed,

    /// Validation failed
    TestFailed {
        /// Attempt number (1-indexed)
        attempt: u32,
        /// Rendered test report
        report: String,
    },

    /// Going back to codegen
    Retrying {
        /// Retry number (1-indexed)
        attempt: u32,
        /// Retry budget
        max_retries: u32,
    },

    /// Validation still failing with the retry budget spent
    MaxRetriesReached {
        /// Retry budget
        max_retries: u32,
    },

    /// The run ended
    Finished {
        /// Final status
        status: PipelineStatus,
    },
}

/// Optional event channel. Sending never fails the pipeline.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventSink {
    sender: Option<mpsc::UnboundedSender<PipelineEvent>>,
}

impl EventSink {
    pub(crate) fn new(sender: mpsc::UnboundedSender<PipelineEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    pub(crate) fn emit(&self, event: PipelineEvent) {
        if let Some(sender) = &self.sender
            && sender.send(event).is_err()
        {
            tracing::debug!("Event receiver dropped");
        }
    }
}
