//! Delay strategies mapping a zero-based attempt index to the time to wait before the next attempt.
//!
//! Any `Fn(u32) -> Duration + Send + Sync + 'static` can be used as a delay through
//! [`Config::with_delay`](crate::Config::with_delay); the functions here cover the common shapes.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, SystemTime};

use retry_policies::policies::ExponentialBackoff;
use retry_policies::{RetryDecision, RetryPolicy};

/// Shared delay function held by a [`Config`](crate::Config).
pub type DelayFn = Arc<dyn Fn(u32) -> Duration + Send + Sync>;

/// Always waits `delay`.
pub fn constant(delay: Duration) -> impl Fn(u32) -> Duration + Send + Sync + 'static {
    move |_| delay
}

/// Always waits one second. This is the delay of the default policy.
pub fn constant_one_second(_attempt: u32) -> Duration {
    Duration::from_secs(1)
}

/// Waits `2^attempt` nanoseconds, saturating once the exponent no longer fits.
pub fn exponential(attempt: u32) -> Duration {
    let nanos = 1_u64.checked_shl(attempt).unwrap_or(u64::MAX);
    Duration::from_nanos(nanos)
}

/// Waits `base * 2^attempt`, saturating at [`Duration::MAX`].
///
/// ```
/// use retrier::delay;
/// use std::time::Duration;
///
/// let delay = delay::exponential_from(Duration::from_millis(100));
/// assert_eq!(delay(0), Duration::from_millis(100));
/// assert_eq!(delay(3), Duration::from_millis(800));
/// ```
pub fn exponential_from(base: Duration) -> impl Fn(u32) -> Duration + Send + Sync + 'static {
    move |attempt| match 1_u32.checked_shl(attempt) {
        Some(factor) => base.saturating_mul(factor),
        None => Duration::MAX,
    }
}

/// Uses a [`RetryPolicy`] as a delay function.
///
/// The policy is asked about each wait with the time the current run started, taken on the
/// first wait of every run (attempt `0`), so policies limited to a total retry duration see the
/// whole run. A `Retry` decision becomes the time left until `execute_after`. Once the policy
/// answers `DoNotRetry`, every remaining wait is `ceiling`: the number of attempts is bounded by
/// [`Config::max_attempts`](crate::Config::max_attempts), not by the policy.
///
/// Policies from [`ExponentialBackoff::builder`] apply full jitter unless told otherwise, so
/// their waits are random within the policy bounds. Build them with
/// [`Jitter::None`](crate::Jitter::None) for a fixed schedule.
///
/// ```
/// use retrier::{delay, policies::ExponentialBackoff, Config, Jitter};
/// use std::time::Duration;
///
/// let backoff = ExponentialBackoff::builder()
///     .retry_bounds(Duration::from_millis(10), Duration::from_millis(200))
///     .jitter(Jitter::None)
///     .build_with_total_retry_duration(Duration::from_secs(5));
/// let config = Config::default()
///     .with_max_attempts(20)
///     .with_delay(delay::from_policy(backoff, Duration::from_millis(200)));
/// assert!(config.validate().is_ok());
/// ```
pub fn from_policy<P>(
    policy: P,
    ceiling: Duration,
) -> impl Fn(u32) -> Duration + Send + Sync + 'static
where
    P: RetryPolicy + Send + Sync + 'static,
{
    let run_started = Mutex::new(SystemTime::now());
    move |attempt| {
        let started = {
            let mut started = run_started.lock().unwrap_or_else(PoisonError::into_inner);
            if attempt == 0 {
                *started = SystemTime::now();
            }
            *started
        };
        match policy.should_retry(started, attempt) {
            RetryDecision::Retry { execute_after } => execute_after
                .duration_since(SystemTime::now())
                .unwrap_or_default(),
            RetryDecision::DoNotRetry => ceiling,
        }
    }
}

/// [`from_policy`] for an [`ExponentialBackoff`], waiting its `max_retry_interval` once its
/// retries are used up.
///
/// ```
/// use retrier::{delay, policies::ExponentialBackoff, Jitter};
/// use std::time::Duration;
///
/// let backoff = ExponentialBackoff::builder()
///     .retry_bounds(Duration::from_millis(10), Duration::from_millis(200))
///     .jitter(Jitter::None)
///     .build_with_max_retries(3);
/// let delay = delay::from_backoff(backoff);
/// assert_eq!(delay(7), Duration::from_millis(200));
/// ```
pub fn from_backoff(
    backoff: ExponentialBackoff,
) -> impl Fn(u32) -> Duration + Send + Sync + 'static {
    from_policy(backoff, backoff.max_retry_interval)
}
