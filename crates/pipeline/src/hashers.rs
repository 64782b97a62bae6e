//! Primitive access shared by the hashing stages.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use checksums::{Crc32Hasher, FastHasher, HashError, Md5Hasher, SlowHasher};
use limiter::{LimiterError, RateLimiter};
use thiserror::Error;

use crate::PipelineConfig;

/// Why a single primitive step did not produce a digest.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StepError {
    /// The primitive reported a fault; only the current seed is affected.
    #[error(transparent)]
    Hash(#[from] HashError),
    /// The admission gate failed; the run cannot continue.
    #[error(transparent)]
    Limiter(#[from] LimiterError),
}

/// The fast and slow primitives plus the gate serialising slow calls.
///
/// Every slow call goes through [`Hashers::slow`], which holds a limiter
/// permit for the whole call. Fast calls are never gated.
pub struct Hashers {
    fast: Arc<dyn FastHasher>,
    slow: Arc<dyn SlowHasher>,
    limiter: Arc<RateLimiter>,
    fast_calls: AtomicU64,
    slow_calls: AtomicU64,
}

impl Hashers {
    /// Combines explicit primitives with a limiter.
    pub fn new(
        fast: Arc<dyn FastHasher>,
        slow: Arc<dyn SlowHasher>,
        limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            fast,
            slow,
            limiter,
            fast_calls: AtomicU64::new(0),
            slow_calls: AtomicU64::new(0),
        }
    }

    /// CRC-32 and MD5 primitives configured from `config`, gated by the
    /// process-wide limiter.
    pub fn reference(config: &PipelineConfig) -> Self {
        Self::new(
            Arc::new(Crc32Hasher::new(&config.salt, config.fast_latency)),
            Arc::new(Md5Hasher::new(&config.salt, config.slow_latency)),
            limiter::shared(),
        )
    }

    /// Runs the fast primitive.
    pub fn fast(&self, data: &[u8]) -> Result<String, StepError> {
        self.fast_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.fast.fast_hash(data)?)
    }

    /// Runs the slow primitive under a limiter permit.
    ///
    /// The permit is released when this call returns, whether the primitive
    /// succeeded, failed or panicked.
    pub fn slow(&self, data: &[u8]) -> Result<String, StepError> {
        let _permit = self.limiter.acquire()?;
        self.slow_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.slow.slow_hash(data)?)
    }

    /// The gate serialising slow calls.
    #[must_use]
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Total fast and slow calls made so far.
    #[must_use]
    pub fn call_counts(&self) -> (u64, u64) {
        (
            self.fast_calls.load(Ordering::Relaxed),
            self.slow_calls.load(Ordering::Relaxed),
        )
    }
}

impl fmt::Debug for Hashers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fast_calls, slow_calls) = self.call_counts();
        f.debug_struct("Hashers")
            .field("limiter", &self.limiter)
            .field("fast_calls", &fast_calls)
            .field("slow_calls", &slow_calls)
            .finish_non_exhaustive()
    }
}
