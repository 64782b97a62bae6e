use std::thread;
use std::time::Duration;

/// Simulated cost of one fast hash call.
pub const DEFAULT_FAST_LATENCY: Duration = Duration::from_secs(1);

/// Simulated cost of one slow hash call, excluding time spent queued on the
/// rate limiter.
pub const DEFAULT_SLOW_LATENCY: Duration = Duration::from_millis(10);

pub(crate) fn simulate(latency: Duration) {
    if !latency.is_zero() {
        thread::sleep(latency);
    }
}
