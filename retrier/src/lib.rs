//! This crate provides [`Retry`], a blocking retry loop around a fallible operation.
//!
//! A [`Config`] bounds the number of attempts, picks the wait between attempts and lists the
//! errors worth retrying as [`Classifier`]s. Runs that stop on a failure are reported to an
//! optional [`RetryListener`]:
//!
//! ```
//! use retrier::{delay, Attempt, Classifier, Config, Fault, Info, Retry};
//! use std::time::Duration;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("upstream busy")]
//! struct Busy;
//!
//! let mut retry = Retry::new();
//! retry
//!     .set_config(
//!         Config::default()
//!             .with_max_attempts(10)
//!             .with_delay(delay::exponential_from(Duration::from_millis(1)))
//!             .with_retryable([Classifier::of_type::<Busy>()]),
//!     )
//!     .unwrap();
//! retry.set_retry_listener(|info: &Info<'_>| {
//!     eprintln!("stopped after {} retries ({}): {}", info.retry_count, info.kind, info.error);
//! });
//!
//! let mut calls = 0;
//! retry.run(|| {
//!     calls += 1;
//!     match calls {
//!         1 | 2 => Attempt::Failed(Busy),
//!         3 => Attempt::Done,
//!         _ => Attempt::Fault(Fault::new("called after success")),
//!     }
//! });
//! assert_eq!(calls, 3);
//! assert_eq!(retry.retry_count(), 2);
//! ```
mod attempt;
mod classifier;
mod config;
pub mod delay;
mod error;
mod listener;
mod retry;

pub use retry_policies::{policies, Jitter};

pub use attempt::Attempt;
pub use classifier::{Classifier, Matcher};
pub use config::{
    Config, MAX_RETRY_FIVE_TIMES, MAX_RETRY_FOREVER, MAX_RETRY_TEN_TIMES, MAX_RETRY_THREE_TIMES,
};
pub use delay::DelayFn;
pub use error::{ConfigError, Fault, Result, RetryError};
pub use listener::{FailureKind, Info, RetryListener};
pub use retry::Retry;
