use std::error::Error as StdError;

use retrier::Info;
use tracing::{field::display, Span};

/// The `otel.name` field added to the span by [`retry_span`](crate::retry_span)
pub const OTEL_NAME: &str = "otel.name";
/// The `otel.status_code` field added to the span by [`retry_span`](crate::retry_span)
pub const OTEL_STATUS_CODE: &str = "otel.status_code";
/// The `retry.max_attempts` field added to the span by [`retry_span`](crate::retry_span)
pub const RETRY_MAX_ATTEMPTS: &str = "retry.max_attempts";
/// The `retry.count` field added to the span by [`retry_span`](crate::retry_span)
pub const RETRY_COUNT: &str = "retry.count";
/// The `retry.failure_kind` field added to the span by [`retry_span`](crate::retry_span)
pub const RETRY_FAILURE_KIND: &str = "retry.failure_kind";
/// The `error.message` field added to the span by [`retry_span`](crate::retry_span)
pub const ERROR_MESSAGE: &str = "error.message";
/// The `error.cause_chain` field added to the span by [`retry_span`](crate::retry_span)
pub const ERROR_CAUSE_CHAIN: &str = "error.cause_chain";

/// [`RetrySpanBackend`] lets you customise what [`TracingListener`] records on the span of a run
/// that stopped on a failure.
///
/// [`TracingListener`]: crate::TracingListener
pub trait RetrySpanBackend {
    fn on_failure(span: &Span, info: &Info<'_>);
}

/// Populates the default failure fields for a given [`retry_span!`](crate::retry_span) span.
#[inline]
pub fn default_on_failure(span: &Span, info: &Info<'_>) {
    span.record(OTEL_STATUS_CODE, "ERROR");
    span.record(RETRY_COUNT, info.retry_count);
    span.record(RETRY_FAILURE_KIND, display(info.kind));
    span.record(ERROR_MESSAGE, display(info.error));
    span.record(ERROR_CAUSE_CHAIN, display(cause_chain(info.error)));
}

/// The default [`RetrySpanBackend`] for [`TracingListener`](crate::TracingListener).
pub struct DefaultSpanBackend;

impl RetrySpanBackend for DefaultSpanBackend {
    fn on_failure(span: &Span, info: &Info<'_>) {
        default_on_failure(span, info)
    }
}

/// Renders an error followed by each of its sources, separated by `: `.
fn cause_chain(error: &(dyn StdError + 'static)) -> String {
    std::iter::successors(Some(error), |&error| error.source())
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}
