//! Routing decision taken after the test stage.

use serde::{Deserialize, Serialize};

/// Decision from the retry router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RetryDecision {
    /// Stop: either the code passed or the retry budget is spent
    Done,

    /// Regenerate code and test again
    Retry {
        /// Which retry this is (1-indexed)
        attempt: u32,
    },
}

impl RetryDecision {
    /// Returns `true` if the decision is Done.
    pub fn is_done(&self) -> bool {
        matches!(self, RetryDecision::Done)
    }

    /// Returns the retry number if this is a Retry decision.
    pub fn attempt(&self) -> Option<u32> {
        match self {
            RetryDecision::Retry { attempt } => Some(*attempt),
            RetryDecision::Done => None,
        }
    }
}
