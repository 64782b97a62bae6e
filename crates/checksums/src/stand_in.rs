use std::fmt;

use crate::{FastHasher, HashError, SlowHasher};

/// Adapts a closure into a [`FastHasher`] and [`SlowHasher`].
///
/// Used to inject deterministic stand-ins with controlled latency or
/// failures in place of the reference primitives.
///
/// # Examples
///
/// ```
/// use checksums::{FastHasher, FnHasher, SlowHasher};
///
/// let reverse = FnHasher::new("reverse", |data: &[u8]| {
///     Ok(String::from_utf8_lossy(data).chars().rev().collect())
/// });
/// assert_eq!(reverse.slow_hash(b"abc").unwrap(), "cba");
/// assert_eq!(reverse.fast_hash(b"xy").unwrap(), "yx");
/// ```
pub struct FnHasher<F> {
    name: &'static str,
    hash: F,
}

impl<F> FnHasher<F>
where
    F: Fn(&[u8]) -> Result<String, HashError> + Send + Sync,
{
    /// Wraps `hash`, labelling it `name` in diagnostics.
    pub const fn new(name: &'static str, hash: F) -> Self {
        Self { name, hash }
    }

    /// Label given at construction.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<F> fmt::Debug for FnHasher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHasher").field("name", &self.name).finish()
    }
}

impl<F> FastHasher for FnHasher<F>
where
    F: Fn(&[u8]) -> Result<String, HashError> + Send + Sync,
{
    fn fast_hash(&self, data: &[u8]) -> Result<String, HashError> {
        (self.hash)(data)
    }
}

impl<F> SlowHasher for FnHasher<F>
where
    F: Fn(&[u8]) -> Result<String, HashError> + Send + Sync,
{
    fn slow_hash(&self, data: &[u8]) -> Result<String, HashError> {
        (self.hash)(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_failures_unchanged() {
        let broken = FnHasher::new("broken", |_: &[u8]| Err(HashError::new("broken", "no power")));
        let err = broken.slow_hash(b"x").unwrap_err();
        assert_eq!(err.primitive(), "broken");
        assert_eq!(err.reason(), "no power");
    }

    #[test]
    fn debug_shows_label() {
        let echo = FnHasher::new("echo", |data: &[u8]| Ok(String::from_utf8_lossy(data).into_owned()));
        assert_eq!(echo.name(), "echo");
        assert_eq!(format!("{echo:?}"), "FnHasher { name: \"echo\" }");
    }
}
