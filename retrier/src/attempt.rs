use crate::error::Fault;

/// The result of invoking the retried operation once.
#[derive(Debug)]
pub enum Attempt<E> {
    /// The operation succeeded.
    Done,
    /// The operation returned an error, which is classified to decide on another attempt.
    Failed(E),
    /// The operation hit an unrecoverable condition. The run stops without classification.
    Fault(Fault),
}

impl<E> Attempt<E> {
    pub fn is_done(&self) -> bool {
        matches!(self, Attempt::Done)
    }
}

impl<E> From<Result<(), E>> for Attempt<E> {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Attempt::Done,
            Err(error) => Attempt::Failed(error),
        }
    }
}

impl<E> From<Fault> for Attempt<E> {
    fn from(fault: Fault) -> Self {
        Attempt::Fault(fault)
    }
}
