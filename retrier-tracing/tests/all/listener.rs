use std::time::Duration;

use retrier::{delay, Attempt, Classifier, Config, Fault, Info, Retry};
use retrier_tracing::{retry_span, DefaultSpanBackend, RetrySpanBackend, TracingListener};
use thiserror::Error;
use tracing::Span;

use crate::helpers::CapturedOutput;

#[derive(Error, Debug)]
#[error("connection reset")]
struct Reset;

#[derive(Error, Debug)]
#[error("sync failed")]
struct SyncFailed(#[source] Reset);

#[derive(Error, Debug)]
#[error("not found")]
struct NotFound;

/// Operation error mixing two unrelated error types.
#[derive(Error, Debug)]
enum SyncError {
    #[error(transparent)]
    Sync(SyncFailed),
    #[error(transparent)]
    NotFound(NotFound),
}

fn retry(max_attempts: u32, retryable: Classifier) -> Retry {
    let mut retry = Retry::with_config(
        Config::default()
            .with_max_attempts(max_attempts)
            .with_delay(delay::constant(Duration::ZERO))
            .with_retryable([retryable]),
    )
    .expect("valid config");
    retry.set_retry_listener(TracingListener::<DefaultSpanBackend>::new("sync"));
    retry
}

#[test]
fn non_retryable_error_is_recorded_on_the_span() {
    let output = CapturedOutput::default();
    let mut retry = retry(5, Classifier::of_type::<Reset>());

    output.capture(|| {
        let span = retry_span!("sync", retry.config());
        let mut calls = 0;
        span.in_scope(|| {
            retry.run(|| -> Result<(), SyncError> {
                calls += 1;
                if calls < 3 {
                    Err(SyncError::Sync(SyncFailed(Reset)))
                } else {
                    Err(SyncError::NotFound(NotFound))
                }
            })
        });
        tracing::info!(parent: &span, "run finished");
    });

    let contents = output.contents();
    assert!(contents.contains("retry stopped by a non-retryable error"));
    assert!(contents.contains("retry.max_attempts=5"));
    assert!(contents.contains("retry.count=2"));
    assert!(contents.contains("retry.failure_kind=non_retryable"));
    assert!(contents.contains("error.message=not found"));
    assert!(contents.contains("WARN"));
}

#[test]
fn fault_is_logged_as_an_error() {
    let output = CapturedOutput::default();
    let mut retry = retry(3, Classifier::any());

    output.capture(|| {
        let span = retry_span!("sync", retry.config());
        span.in_scope(|| retry.run(|| Attempt::<Reset>::Fault(Fault::new("lock poisoned"))));
        tracing::info!(parent: &span, "run finished");
    });

    let contents = output.contents();
    assert!(contents.contains("retry stopped by a fault"));
    assert!(contents.contains("ERROR"));
    assert!(contents.contains("retry.failure_kind=fault"));
    assert!(contents.contains("error.message=fault: lock poisoned"));
    assert!(contents.contains("retry.count=0"));
}

#[test]
fn cause_chain_is_recorded() {
    let output = CapturedOutput::default();
    let mut retry = retry(3, Classifier::of_type::<NotFound>());

    output.capture(|| {
        let span = retry_span!("sync", retry.config());
        span.in_scope(|| retry.run(|| Err::<(), _>(SyncFailed(Reset))));
        tracing::info!(parent: &span, "run finished");
    });

    assert!(output
        .contents()
        .contains("error.cause_chain=sync failed: connection reset"));
}

#[test]
fn success_emits_no_failure_event() {
    let output = CapturedOutput::default();
    let mut retry = retry(3, Classifier::any());

    output.capture(|| {
        let span = retry_span!("sync", retry.config());
        span.in_scope(|| retry.run(|| Ok::<(), Reset>(())));
    });

    assert!(!output.contents().contains("retry stopped"));
}

#[test]
fn custom_span_backend_is_used() {
    struct CountOnly;

    impl RetrySpanBackend for CountOnly {
        fn on_failure(span: &Span, info: &Info<'_>) {
            span.record(retrier_tracing::RETRY_COUNT, info.retry_count);
        }
    }

    let output = CapturedOutput::default();
    let mut retry = retry(3, Classifier::of_type::<NotFound>());
    retry.set_retry_listener(TracingListener::<CountOnly>::new("sync"));

    output.capture(|| {
        let span = retry_span!("sync", retry.config());
        span.in_scope(|| retry.run(|| Err::<(), _>(Reset)));
        tracing::info!(parent: &span, "run finished");
    });

    let contents = output.contents();
    assert!(contents.contains("retry.count=0"));
    assert!(!contents.contains("error.message"));
}

#[test]
fn listener_without_subscriber_is_harmless() {
    let mut retry = retry(2, Classifier::of_type::<NotFound>());
    retry.run(|| Err::<(), _>(Reset));
    assert_eq!(retry.retry_count(), 0);
}

#[test]
fn default_listener_is_named_retry() {
    assert_eq!(<TracingListener>::default().operation(), "retry");
    let listener = TracingListener::<DefaultSpanBackend>::new("sync");
    assert_eq!(listener.clone().operation(), "sync");
}
