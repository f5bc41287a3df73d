use std::error::Error as StdError;
use std::fmt;

/// How a run ended when it ended on a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The operation returned an error outside the retryable set.
    NonRetryable,
    /// The operation raised a [`Fault`](crate::Fault).
    Fault,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::NonRetryable => "non_retryable",
            FailureKind::Fault => "fault",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a [`RetryListener`] is told when a run stops on a failure.
#[derive(Debug, Clone, Copy)]
pub struct Info<'a> {
    /// The error or fault that stopped the run.
    pub error: &'a (dyn StdError + 'static),
    /// Attempts completed before the one that stopped the run.
    pub retry_count: u32,
    pub kind: FailureKind,
}

impl Info<'_> {
    pub fn is_fault(&self) -> bool {
        self.kind == FailureKind::Fault
    }
}

/// Observer attached to a [`Retry`](crate::Retry) with
/// [`set_retry_listener`](crate::Retry::set_retry_listener).
///
/// It is called exactly once per run that stops on a non-retryable error or a fault, and never
/// when the run succeeds or runs out of attempts.
///
/// # Example
///
/// ```
/// use retrier::{Info, RetryListener};
///
/// struct PrintListener;
///
/// impl RetryListener for PrintListener {
///     fn on_failure(&self, info: &Info<'_>) {
///         println!("gave up after {} retries: {}", info.retry_count, info.error);
///     }
/// }
/// ```
///
/// Closures taking `&Info` are listeners too.
pub trait RetryListener: 'static + Send + Sync {
    fn on_failure(&self, info: &Info<'_>);
}

impl<F> RetryListener for F
where
    F: Fn(&Info<'_>) + Send + Sync + 'static,
{
    fn on_failure(&self, info: &Info<'_>) {
        (self)(info)
    }
}
