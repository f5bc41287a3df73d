use retrier::{Attempt, Classifier, Config, Fault, Retry, RetryError};

use crate::helpers::{DelayCounter, ErrorProducer, Recorder, Refused, Timeout};

fn strict_retry(retryable: Classifier, delays: &DelayCounter) -> Retry {
    Retry::with_config(
        Config::default()
            .with_max_attempts(3)
            .with_delay(delays.delay())
            .with_retryable([retryable]),
    )
    .expect("valid config")
}

#[test]
fn success_is_ok() {
    let delays = DelayCounter::default();
    let mut retry = strict_retry(Classifier::any(), &delays);

    let mut producer = ErrorProducer::new(2, Timeout);
    assert!(retry.run_strict(|| producer.run()).is_ok());
    assert_eq!(producer.calls(), 3);
}

#[test]
fn exhaustion_returns_the_last_error() {
    let delays = DelayCounter::default();
    let recorder = Recorder::default();
    let mut retry = strict_retry(Classifier::of_type::<Timeout>(), &delays);
    retry.set_retry_listener(recorder.clone());

    let mut producer = ErrorProducer::always(Timeout);
    let err = retry.run_strict(|| producer.run()).unwrap_err();

    assert!(err.is_exhausted());
    assert_eq!(err.attempts(), 3);
    assert!(err.last_error().unwrap().is::<Timeout>());
    // The listener contract is the same as `run`: exhaustion is not a notification.
    assert_eq!(recorder.len(), 0);
    assert_eq!(delays.count(), 2);
}

#[test]
fn non_retryable_error_is_returned() {
    let delays = DelayCounter::default();
    let recorder = Recorder::default();
    let mut retry = strict_retry(Classifier::of_type::<Refused>(), &delays);
    retry.set_retry_listener(recorder.clone());

    let mut producer = ErrorProducer::always(Timeout);
    let err = retry.run_strict(|| producer.run()).unwrap_err();

    assert!(err.is_non_retryable());
    assert_eq!(err.attempts(), 1);
    assert_eq!(recorder.len(), 1);
    assert_eq!(
        err.to_string(),
        "non-retryable error after 1 attempt(s): timed out"
    );
}

#[test]
fn fault_is_returned() {
    let delays = DelayCounter::default();
    let mut retry = strict_retry(Classifier::any(), &delays);

    let mut calls = 0;
    let err = retry
        .run_strict(|| {
            calls += 1;
            if calls == 1 {
                Attempt::Failed(Refused)
            } else {
                Attempt::Fault(Fault::new("poisoned lock"))
            }
        })
        .unwrap_err();

    assert!(matches!(
        &err,
        RetryError::Fault { attempts: 2, fault } if fault.message() == "poisoned lock"
    ));
}

#[test]
fn strict_errors_chain_into_anyhow() {
    let delays = DelayCounter::default();
    let mut retry = strict_retry(Classifier::any(), &delays);

    let mut producer = ErrorProducer::always(Timeout);
    let err = anyhow::Error::new(retry.run_strict(|| producer.run()).unwrap_err());

    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    assert_eq!(
        chain,
        vec![
            "retry attempts exhausted after 3 attempt(s): timed out".to_string(),
            "timed out".to_string(),
        ]
    );
}
