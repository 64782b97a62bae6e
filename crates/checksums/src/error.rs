use thiserror::Error;

/// Failure reported by a hash primitive.
///
/// The reference primitives never fail; the type exists so injected
/// primitives (hardware backends, test stand-ins) can report faults that the
/// pipeline attributes to a single seed.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{primitive} hash failed: {reason}")]
pub struct HashError {
    primitive: &'static str,
    reason: String,
}

impl HashError {
    /// Creates an error for the named primitive.
    #[must_use]
    pub fn new(primitive: &'static str, reason: impl Into<String>) -> Self {
        Self {
            primitive,
            reason: reason.into(),
        }
    }

    /// Name of the primitive that failed.
    #[must_use]
    pub const fn primitive(&self) -> &'static str {
        self.primitive
    }

    /// Human-readable failure description.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
