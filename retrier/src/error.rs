use std::any::Any;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RetryError>;

/// Reasons a [`Config`](crate::Config) is refused by validation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The retryable error set was left unset.
    #[error("retryable errors must be set, use `Classifier::any()` to retry on any error")]
    MissingRetryableErrors,
    /// The retryable error set was set but holds no classifier.
    #[error("retryable errors must hold at least one classifier")]
    EmptyRetryableErrors,
    #[error("max attempts must be greater than 0")]
    ZeroMaxAttempts,
    #[error("delay function must be set")]
    MissingDelay,
}

/// An unrecoverable signal raised by an operation.
///
/// Unlike a returned error, a fault is never classified: the loop reports it and stops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("fault: {message}")]
pub struct Fault {
    message: String,
}

impl Fault {
    pub fn new(message: impl Into<String>) -> Self {
        Fault {
            message: message.into(),
        }
    }

    /// Builds a fault from the payload returned by [`std::panic::catch_unwind`].
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Fault { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Terminal outcome of [`Retry::run_strict`](crate::Retry::run_strict).
#[derive(Error, Debug)]
pub enum RetryError {
    /// The operation returned an error outside the retryable set.
    #[error("non-retryable error after {attempts} attempt(s): {source}")]
    NonRetryable {
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },
    /// The operation raised a fault.
    #[error("operation faulted after {attempts} attempt(s): {fault}")]
    Fault {
        attempts: u32,
        #[source]
        fault: Fault,
    },
    /// Every permitted attempt failed with a retryable error.
    #[error("retry attempts exhausted after {attempts} attempt(s): {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },
}

impl RetryError {
    /// Number of attempts the operation was invoked before the loop ended.
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::NonRetryable { attempts, .. }
            | RetryError::Fault { attempts, .. }
            | RetryError::Exhausted { attempts, .. } => *attempts,
        }
    }

    /// Returns true if the retry budget ran out.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }

    /// Returns true if the operation raised a fault.
    pub fn is_fault(&self) -> bool {
        matches!(self, RetryError::Fault { .. })
    }

    /// Returns true if the operation returned an error outside the retryable set.
    pub fn is_non_retryable(&self) -> bool {
        matches!(self, RetryError::NonRetryable { .. })
    }

    /// Returns the error returned by the operation, if the loop ended on one.
    pub fn last_error(&self) -> Option<&anyhow::Error> {
        match self {
            RetryError::NonRetryable { source, .. } | RetryError::Exhausted { source, .. } => {
                Some(source)
            }
            RetryError::Fault { .. } => None,
        }
    }
}
