use std::fmt;

use super::RateLimiter;

/// Scoped admission to a [`RateLimiter`].
///
/// The slot is returned when the permit is dropped.
#[must_use = "dropping a permit releases its slot immediately"]
pub struct Permit<'a> {
    limiter: &'a RateLimiter,
}

impl<'a> Permit<'a> {
    pub(super) const fn new(limiter: &'a RateLimiter) -> Self {
        Self { limiter }
    }

    /// The limiter this permit was granted by.
    #[must_use]
    pub const fn limiter(&self) -> &'a RateLimiter {
        self.limiter
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        self.limiter.release();
    }
}

impl fmt::Debug for Permit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Permit")
            .field("capacity", &self.limiter.capacity())
            .finish()
    }
}
