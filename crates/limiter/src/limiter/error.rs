use std::time::Duration;

use thiserror::Error;

/// Errors raised while acquiring a [`Permit`](super::Permit).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LimiterError {
    /// The limiter's bookkeeping was poisoned by a panic while it was being
    /// updated. Admission state can no longer be trusted.
    #[error("rate limiter state poisoned")]
    Poisoned,
    /// No slot became free within the requested wait.
    #[error("no rate limiter slot became free within {0:?}")]
    TimedOut(Duration),
}
