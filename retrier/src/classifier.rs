use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// A rule deciding whether an error returned by an operation is eligible for retry.
///
/// ```
/// use retrier::Classifier;
/// use std::io;
///
/// let retryable = vec![Classifier::of_type::<io::Error>()];
/// let err = io::Error::new(io::ErrorKind::TimedOut, "timed out");
/// assert!(Classifier::matches_any(&retryable, &err));
/// ```
#[derive(Clone)]
pub enum Classifier {
    /// Matches every error.
    Any,
    /// Matches an error when it, or an error in its `source()` chain, satisfies the matcher.
    Specific(Matcher),
}

/// A named predicate over a single error in a chain.
#[derive(Clone)]
pub struct Matcher {
    name: String,
    test: Arc<dyn Fn(&(dyn StdError + 'static)) -> bool + Send + Sync>,
}

impl Matcher {
    pub fn new<F>(name: impl Into<String>, test: F) -> Self
    where
        F: Fn(&(dyn StdError + 'static)) -> bool + Send + Sync + 'static,
    {
        Matcher {
            name: name.into(),
            test: Arc::new(test),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn test(&self, error: &(dyn StdError + 'static)) -> bool {
        (self.test)(error)
    }
}

impl Classifier {
    /// The wildcard classifier.
    pub fn any() -> Self {
        Classifier::Any
    }

    /// Matches errors of type `T` anywhere in the chain.
    pub fn of_type<T>() -> Self
    where
        T: StdError + 'static,
    {
        Classifier::Specific(Matcher::new(std::any::type_name::<T>(), |error| {
            error.is::<T>()
        }))
    }

    /// Matches errors of type `T` that compare equal to `expected` anywhere in the chain.
    pub fn value<T>(expected: T) -> Self
    where
        T: StdError + PartialEq + Send + Sync + 'static,
    {
        let name = format!("{} == {}", std::any::type_name::<T>(), expected);
        Classifier::Specific(Matcher::new(name, move |error| {
            error
                .downcast_ref::<T>()
                .map_or(false, |error| *error == expected)
        }))
    }

    /// Matches errors satisfying a caller-supplied predicate anywhere in the chain.
    pub fn custom<F>(name: impl Into<String>, test: F) -> Self
    where
        F: Fn(&(dyn StdError + 'static)) -> bool + Send + Sync + 'static,
    {
        Classifier::Specific(Matcher::new(name, test))
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Classifier::Any)
    }

    /// Returns true if this classifier matches `error` or one of its sources.
    pub fn matches(&self, error: &(dyn StdError + 'static)) -> bool {
        match self {
            Classifier::Any => true,
            Classifier::Specific(matcher) => chain(error).any(|error| matcher.test(error)),
        }
    }

    /// Returns true on the first classifier in `classifiers` matching `error`.
    pub fn matches_any(classifiers: &[Classifier], error: &(dyn StdError + 'static)) -> bool {
        classifiers
            .iter()
            .any(|classifier| classifier.matches(error))
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classifier::Any => f.write_str("Any"),
            Classifier::Specific(matcher) => {
                f.debug_tuple("Specific").field(&matcher.name()).finish()
            }
        }
    }
}

/// Walks `error` followed by every error in its `source()` chain.
fn chain<'a>(
    error: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(error), |&error| error.source())
}
