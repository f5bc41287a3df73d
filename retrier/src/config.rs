use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::classifier::Classifier;
use crate::delay::{self, DelayFn};
use crate::error::ConfigError;

/// Attempt budget treated as "retry until it works".
pub const MAX_RETRY_FOREVER: u32 = 99_999_999;
pub const MAX_RETRY_THREE_TIMES: u32 = 3;
pub const MAX_RETRY_FIVE_TIMES: u32 = 5;
pub const MAX_RETRY_TEN_TIMES: u32 = 10;

/// The policy governing a [`Retry`](crate::Retry) run.
///
/// Fields are public so a policy can be spelled out literally, including the unset states that
/// [`validate`](Self::validate) refuses. The `with_*` methods are the usual way to build one:
///
/// ```
/// use retrier::{delay, Classifier, Config, MAX_RETRY_FIVE_TIMES};
/// use std::time::Duration;
///
/// let config = Config::default()
///     .with_max_attempts(MAX_RETRY_FIVE_TIMES)
///     .with_delay(delay::constant(Duration::from_millis(200)))
///     .with_retryable([Classifier::of_type::<std::io::Error>()]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct Config {
    /// Upper bound on the number of times the operation is invoked.
    pub max_attempts: u32,
    /// Maps the zero-based attempt index to the wait before the next attempt.
    pub delay: Option<DelayFn>,
    /// Errors worth another attempt. Anything else stops the run.
    pub retryable: Option<Vec<Classifier>>,
}

impl Config {
    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.retryable {
            None => return Err(ConfigError::MissingRetryableErrors),
            Some(classifiers) if classifiers.is_empty() => {
                return Err(ConfigError::EmptyRetryableErrors)
            }
            Some(_) => {}
        }

        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }

        if self.delay.is_none() {
            return Err(ConfigError::MissingDelay);
        }

        Ok(())
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_delay<F>(mut self, delay: F) -> Self
    where
        F: Fn(u32) -> Duration + Send + Sync + 'static,
    {
        self.delay = Some(Arc::new(delay));
        self
    }

    pub fn with_retryable<I>(mut self, classifiers: I) -> Self
    where
        I: IntoIterator<Item = Classifier>,
    {
        self.retryable = Some(classifiers.into_iter().collect());
        self
    }

    /// Retry on any error.
    pub fn retry_any(self) -> Self {
        self.with_retryable([Classifier::Any])
    }

    /// Wait before the attempt following `attempt`, or zero when no delay is set.
    pub(crate) fn delay_for(&self, attempt: u32) -> Duration {
        self.delay
            .as_ref()
            .map_or(Duration::ZERO, |delay| delay(attempt))
    }

    /// Returns true if `error` matches one of the retryable classifiers.
    pub(crate) fn is_retryable(&self, error: &(dyn std::error::Error + 'static)) -> bool {
        match &self.retryable {
            Some(classifiers) => Classifier::matches_any(classifiers, error),
            None => false,
        }
    }
}

/// Unbounded attempts, one second between attempts, retry on any error.
impl Default for Config {
    fn default() -> Self {
        Config {
            max_attempts: MAX_RETRY_FOREVER,
            delay: Some(Arc::new(delay::constant_one_second)),
            retryable: Some(vec![Classifier::Any]),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("max_attempts", &self.max_attempts)
            .field("delay", &self.delay.as_ref().map(|_| "Fn(u32) -> Duration"))
            .field("retryable", &self.retryable)
            .finish()
    }
}
