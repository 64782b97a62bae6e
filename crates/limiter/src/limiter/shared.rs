use std::sync::{Arc, OnceLock};

use super::RateLimiter;

/// Returns the process-wide exclusive limiter.
///
/// Every call returns a handle to the same limiter, so all slow hash calls
/// made through it are serialised across the whole process.
pub fn shared() -> Arc<RateLimiter> {
    static SHARED: OnceLock<Arc<RateLimiter>> = OnceLock::new();
    Arc::clone(SHARED.get_or_init(|| Arc::new(RateLimiter::exclusive())))
}
