use std::borrow::Cow;
use std::marker::PhantomData;

use retrier::{FailureKind, Info, RetryListener};
use tracing::Span;

use crate::{DefaultSpanBackend, RetrySpanBackend};

/// Listener recording failed runs on the current span and as `tracing` events.
///
/// Faults are logged at `ERROR`, non-retryable errors at `WARN`. Run the retry loop inside a
/// [`retry_span!`](crate::retry_span) span so the failure fields have somewhere to go.
pub struct TracingListener<S: RetrySpanBackend = DefaultSpanBackend> {
    operation: Cow<'static, str>,
    span_backend: PhantomData<S>,
}

impl<S: RetrySpanBackend> TracingListener<S> {
    pub fn new(operation: impl Into<Cow<'static, str>>) -> TracingListener<S> {
        TracingListener {
            operation: operation.into(),
            span_backend: PhantomData,
        }
    }

    /// Name of the retried operation, attached to every event.
    pub fn operation(&self) -> &str {
        &self.operation
    }
}

impl<S: RetrySpanBackend> Clone for TracingListener<S> {
    fn clone(&self) -> Self {
        Self::new(self.operation.clone())
    }
}

impl Default for TracingListener<DefaultSpanBackend> {
    fn default() -> Self {
        TracingListener::new("retry")
    }
}

impl<S> RetryListener for TracingListener<S>
where
    S: RetrySpanBackend + Send + Sync + 'static,
{
    fn on_failure(&self, info: &Info<'_>) {
        S::on_failure(&Span::current(), info);

        match info.kind {
            FailureKind::Fault => tracing::error!(
                operation = %self.operation,
                retry.count = info.retry_count,
                error = %info.error,
                "retry stopped by a fault"
            ),
            FailureKind::NonRetryable => tracing::warn!(
                operation = %self.operation,
                retry.count = info.retry_count,
                error = %info.error,
                "retry stopped by a non-retryable error"
            ),
        }
    }
}
