//! Tracing support for [`retrier`].
//!
//! Run a [`Retry`](retrier::Retry) inside a [`retry_span!`] span and register a
//! [`TracingListener`] to get the outcome of failed runs recorded on the span and logged as events.
//!
//! In this example we define a custom span backend which only records the error message.
//! ```rust
//! use retrier::{delay, Classifier, Config, Info, Retry};
//! use retrier_tracing::{retry_span, RetrySpanBackend, TracingListener, ERROR_MESSAGE};
//! use tracing::Span;
//!
//! pub struct MessageOnly;
//!
//! impl RetrySpanBackend for MessageOnly {
//!     fn on_failure(span: &Span, info: &Info<'_>) {
//!         span.record(ERROR_MESSAGE, tracing::field::display(info.error));
//!     }
//! }
//!
//! let mut retry = Retry::with_config(
//!     Config::default()
//!         .with_max_attempts(3)
//!         .with_delay(delay::constant(std::time::Duration::from_millis(5)))
//!         .with_retryable([Classifier::of_type::<std::io::Error>()]),
//! )
//! .unwrap();
//! retry.set_retry_listener(TracingListener::<MessageOnly>::new("load-settings"));
//!
//! let span = retry_span!("load-settings", retry.config());
//! span.in_scope(|| retry.run(|| std::fs::read_to_string("settings.toml").map(|_| ())));
//! ```

mod listener;
mod span_backend;
pub use listener::TracingListener;
pub use span_backend::{
    default_on_failure, DefaultSpanBackend, RetrySpanBackend, ERROR_CAUSE_CHAIN, ERROR_MESSAGE,
    OTEL_NAME, OTEL_STATUS_CODE, RETRY_COUNT, RETRY_FAILURE_KIND, RETRY_MAX_ATTEMPTS,
};

#[doc(hidden)]
pub mod retry_span;
