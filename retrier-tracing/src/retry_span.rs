/// Builds the span a retry run is executed in.
///
/// The span is named `retry` and carries `otel.name`, `retry.max_attempts` and, left empty until
/// a [`TracingListener`](crate::TracingListener) fills them, the failure fields listed in the
/// crate root. Extra fields can be appended, and the level defaults to `INFO`.
///
/// ```rust
/// use retrier::Config;
/// use retrier_tracing::retry_span;
///
/// let config = Config::default().with_max_attempts(3);
/// let span = retry_span!("fetch-index", &config);
/// let span = retry_span!(level = tracing::Level::DEBUG, "fetch-index", &config, shard = 4);
/// ```
#[macro_export]
macro_rules! retry_span {
    // Custom level, no additional fields
    (level=$level:expr, $name:expr, $config:expr) => {
        $crate::retry_span!(level=$level, $name, $config,)
    };
    // Custom level with additional fields
    (level=$level:expr, $name:expr, $config:expr, $($field:tt)*) => {
        {
            let otel_name = $name;
            let max_attempts = $config.max_attempts;

            macro_rules! retry_span_at {
                ($lvl:expr) => {
                    $crate::retry_span::private::span!(
                        $lvl,
                        "retry",
                        otel.name = %otel_name,
                        retry.max_attempts = max_attempts,
                        otel.status_code = $crate::retry_span::private::field::Empty,
                        retry.count = $crate::retry_span::private::field::Empty,
                        retry.failure_kind = $crate::retry_span::private::field::Empty,
                        error.message = $crate::retry_span::private::field::Empty,
                        error.cause_chain = $crate::retry_span::private::field::Empty,
                        $($field)*
                    )
                }
            }

            let span = match $level {
                $crate::retry_span::private::Level::TRACE => {
                    retry_span_at!($crate::retry_span::private::Level::TRACE)
                },
                $crate::retry_span::private::Level::DEBUG => {
                    retry_span_at!($crate::retry_span::private::Level::DEBUG)
                },
                $crate::retry_span::private::Level::INFO => {
                    retry_span_at!($crate::retry_span::private::Level::INFO)
                },
                $crate::retry_span::private::Level::WARN => {
                    retry_span_at!($crate::retry_span::private::Level::WARN)
                },
                $crate::retry_span::private::Level::ERROR => {
                    retry_span_at!($crate::retry_span::private::Level::ERROR)
                },
            };
            span
        }
    };
    // Default INFO level, no additional fields
    ($name:expr, $config:expr) => {
        $crate::retry_span!(level=$crate::retry_span::private::Level::INFO, $name, $config,)
    };
    // Default INFO level with additional fields
    ($name:expr, $config:expr, $($field:tt)*) => {
        $crate::retry_span!(level=$crate::retry_span::private::Level::INFO, $name, $config, $($field)*)
    };
}

#[doc(hidden)]
pub mod private {
    #[doc(hidden)]
    pub use tracing::{field, span, Level};
}
