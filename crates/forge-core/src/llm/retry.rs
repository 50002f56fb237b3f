//! Exponential-backoff retries around any provider.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use std::sync::Arc;
use std::time::Duration;

use super::{CompletionRequest, CompletionResponse, LlmProvider};
use crate::{Error, Result};

/// Default number of attempts, including the first call.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Retries retryable provider errors with exponential backoff.
///
/// Non-retryable errors (see [`Error::is_retryable`]) are returned at once.
#[derive(Clone)]
pub struct RetryWrapper {
    inner: Arc<dyn LlmProvider>,
    max_attempts: usize,
    min_delay: Duration,
    max_delay: Duration,
}

impl RetryWrapper {
    /// Wraps a provider with the default policy.
    pub fn new(inner: Arc<dyn LlmProvider>) -> Self {
        Self {
            inner,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }

    /// Sets the total number of attempts (at least one).
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Sets the backoff delay bounds.
    pub fn with_delays(mut self, min: Duration, max: Duration) -> Self {
        self.min_delay = min;
        self.max_delay = max.max(min);
        self
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_attempts - 1)
            .with_jitter()
    }
}

#[async_trait]
impl LlmProvider for RetryWrapper {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        (|| async { self.inner.complete(request.clone()).await })
            .retry(self.backoff())
            .sleep(tokio::time::sleep)
            .when(Error::is_retryable)
            .notify(|err: &Error, delay: Duration| {
                tracing::warn!(
                    provider = self.inner.name(),
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "LLM call failed, retrying"
                );
            })
            .await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
