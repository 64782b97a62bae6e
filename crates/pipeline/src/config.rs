use std::num::NonZeroUsize;
use std::time::Duration;

use checksums::{DEFAULT_FAST_LATENCY, DEFAULT_SALT, DEFAULT_SLOW_LATENCY};

/// Default capacity of every hand-off queue.
///
/// Matches the input bound of the reference signer service.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Minimum queue capacity; a zero-capacity rendezvous channel is never used.
pub const MIN_QUEUE_CAPACITY: usize = 1;

/// Maximum queue capacity.
pub const MAX_QUEUE_CAPACITY: usize = 4096;

/// Tunables for one [`Signer`](crate::Signer).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineConfig {
    /// Capacity of each queue between stages.
    pub queue_capacity: usize,
    /// Upper bound on concurrently processed items per stage. `None` spawns
    /// one sub-task per item as soon as it arrives.
    pub max_in_flight: Option<NonZeroUsize>,
    /// Salt appended to every primitive input.
    pub salt: String,
    /// Simulated latency of each fast call.
    pub fast_latency: Duration,
    /// Simulated latency of each slow call.
    pub slow_latency: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_in_flight: None,
            salt: DEFAULT_SALT.to_owned(),
            fast_latency: DEFAULT_FAST_LATENCY,
            slow_latency: DEFAULT_SLOW_LATENCY,
        }
    }
}

impl PipelineConfig {
    /// Sets the queue capacity, clamped to the supported range.
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.clamp(MIN_QUEUE_CAPACITY, MAX_QUEUE_CAPACITY);
        self
    }

    /// Bounds the number of items each stage processes at once.
    #[must_use]
    pub const fn with_max_in_flight(mut self, limit: Option<NonZeroUsize>) -> Self {
        self.max_in_flight = limit;
        self
    }

    /// Sets the salt used by the reference primitives.
    #[must_use]
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = salt.into();
        self
    }

    /// Sets the simulated primitive latencies.
    #[must_use]
    pub const fn with_latencies(mut self, fast: Duration, slow: Duration) -> Self {
        self.fast_latency = fast;
        self.slow_latency = slow;
        self
    }

    /// Configuration with latency simulation switched off.
    #[must_use]
    pub fn instant() -> Self {
        Self::default().with_latencies(Duration::ZERO, Duration::ZERO)
    }

    pub(crate) fn effective_queue_capacity(&self) -> usize {
        self.queue_capacity.clamp(MIN_QUEUE_CAPACITY, MAX_QUEUE_CAPACITY)
    }
}
