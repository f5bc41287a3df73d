//! `Retry` drives a fallible operation until it succeeds, fails in a way that is not worth
//! retrying, or runs out of attempts.

use std::error::Error as StdError;
use std::fmt;

use anyhow::anyhow;

use crate::attempt::Attempt;
use crate::config::Config;
use crate::error::{ConfigError, Fault, RetryError};
use crate::listener::{FailureKind, Info, RetryListener};

/// `Retry` re-invokes an operation according to its [`Config`].
///
/// Each run is sequential and blocking: the operation is called on the current thread and the
/// wait between attempts is a [`std::thread::sleep`]. A run stops when
///
/// - the operation returns [`Attempt::Done`] (or `Ok(())`),
/// - the operation returns an error that no retryable classifier matches,
/// - the operation raises a [`Fault`],
/// - or `max_attempts` invocations have been made.
///
/// The registered [`RetryListener`] hears about the second and third cases only.
///
///```rust
///     use retrier::{delay, Classifier, Config, Info, Retry, MAX_RETRY_THREE_TIMES};
///     use std::{io, time::Duration};
///
///     let mut retry = Retry::with_config(
///         Config::default()
///             .with_max_attempts(MAX_RETRY_THREE_TIMES)
///             .with_delay(delay::constant(Duration::from_millis(10)))
///             .with_retryable([Classifier::of_type::<io::Error>()]),
///     )
///     .unwrap();
///     retry.set_retry_listener(|info: &Info<'_>| {
///         eprintln!("giving up after {} retries: {}", info.retry_count, info.error);
///     });
///
///     let mut calls = 0;
///     retry.run(|| {
///         calls += 1;
///         if calls < 3 {
///             Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
///         } else {
///             Ok(())
///         }
///     });
///     assert_eq!(calls, 3);
///```
pub struct Retry {
    config: Config,
    retry_count: u32,
    retry_listener: Option<Box<dyn RetryListener>>,
}

/// How a run ended, before it is turned into a return value.
enum Conclusion {
    Succeeded,
    Rejected(anyhow::Error),
    Faulted(Fault),
    Exhausted(Option<anyhow::Error>),
}

impl Retry {
    /// Construct `Retry` with the default [`Config`].
    pub fn new() -> Self {
        Retry {
            config: Config::default(),
            retry_count: 0,
            retry_listener: None,
        }
    }

    /// Construct `Retry` with a custom [`Config`], refusing it if it does not validate.
    pub fn with_config(config: Config) -> Result<Self, ConfigError> {
        let mut retry = Retry::new();
        retry.set_config(config)?;
        Ok(retry)
    }

    /// Replace the policy. On error the current policy stays in place.
    pub fn set_config(&mut self, config: Config) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Attempts completed by the most recent run.
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Register the listener told about runs that stop on a failure, replacing any previous one.
    pub fn set_retry_listener<L>(&mut self, listener: L)
    where
        L: RetryListener,
    {
        self.retry_listener = Some(Box::new(listener));
    }

    pub fn clear_retry_listener(&mut self) {
        self.retry_listener = None;
    }

    /// Run `operation` until it succeeds, stops on a failure, or the attempts run out.
    ///
    /// Nothing is returned: failures are only reported through the listener, and running out of
    /// attempts while every error was retryable ends the run silently. Use
    /// [`run_strict`](Self::run_strict) to get the outcome back.
    pub fn run<F, R, E>(&mut self, operation: F)
    where
        F: FnMut() -> R,
        R: Into<Attempt<E>>,
        E: Into<anyhow::Error>,
    {
        self.execute(operation);
    }

    /// Like [`run`](Self::run), but also returns how the run ended, including
    /// [`RetryError::Exhausted`] when every permitted attempt failed with a retryable error.
    pub fn run_strict<F, R, E>(&mut self, operation: F) -> crate::Result<()>
    where
        F: FnMut() -> R,
        R: Into<Attempt<E>>,
        E: Into<anyhow::Error>,
    {
        match self.execute(operation) {
            Conclusion::Succeeded => Ok(()),
            Conclusion::Rejected(source) => Err(RetryError::NonRetryable {
                attempts: self.retry_count + 1,
                source,
            }),
            Conclusion::Faulted(fault) => Err(RetryError::Fault {
                attempts: self.retry_count + 1,
                fault,
            }),
            Conclusion::Exhausted(source) => Err(RetryError::Exhausted {
                attempts: self.retry_count,
                source: source.unwrap_or_else(|| anyhow!("no attempt was made")),
            }),
        }
    }

    fn execute<F, R, E>(&mut self, mut operation: F) -> Conclusion
    where
        F: FnMut() -> R,
        R: Into<Attempt<E>>,
        E: Into<anyhow::Error>,
    {
        self.retry_count = 0;
        let mut last_error = None;

        while self.retry_count < self.config.max_attempts {
            match operation().into() {
                Attempt::Done => {
                    #[cfg(feature = "tracing")]
                    if self.retry_count > 0 {
                        tracing::debug!("Operation succeeded after {} retries", self.retry_count);
                    }
                    return Conclusion::Succeeded;
                }
                Attempt::Fault(fault) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Attempt #{} faulted, stopping: {}", self.retry_count, fault);
                    self.notify(&fault, FailureKind::Fault);
                    return Conclusion::Faulted(fault);
                }
                Attempt::Failed(error) => {
                    let error: anyhow::Error = error.into();
                    if !self.config.is_retryable(&*error) {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            "Attempt #{} failed with a non-retryable error: {}",
                            self.retry_count,
                            error
                        );
                        self.notify(&*error, FailureKind::NonRetryable);
                        return Conclusion::Rejected(error);
                    }

                    // No wait after the final attempt.
                    if !self.is_last_attempt() {
                        let duration = self.config.delay_for(self.retry_count);
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            "Retry attempt #{}. Sleeping {:?} before the next attempt",
                            self.retry_count,
                            duration
                        );
                        std::thread::sleep(duration);
                    }
                    last_error = Some(error);
                }
            }

            self.retry_count += 1;
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            "Retry attempts exhausted after {} attempts",
            self.retry_count
        );
        Conclusion::Exhausted(last_error)
    }

    fn is_last_attempt(&self) -> bool {
        self.retry_count >= self.config.max_attempts - 1
    }

    fn notify(&self, error: &(dyn StdError + 'static), kind: FailureKind) {
        if let Some(listener) = &self.retry_listener {
            listener.on_failure(&Info {
                error,
                retry_count: self.retry_count,
                kind,
            });
        }
    }
}

impl Default for Retry {
    fn default() -> Self {
        Retry::new()
    }
}

impl fmt::Debug for Retry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retry")
            .field("config", &self.config)
            .field("retry_count", &self.retry_count)
            .field("has_retry_listener", &self.retry_listener.is_some())
            .finish()
    }
}
