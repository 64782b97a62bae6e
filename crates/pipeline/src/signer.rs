//! The assembled three-stage signer.

use std::fmt;
use std::sync::Arc;

use checksums::{Crc32Hasher, FastHasher, Md5Hasher, SlowHasher};
use limiter::RateLimiter;

use crate::error::{HashComputationError, PipelineError};
use crate::{
    CombineStage, CombinedResult, Hashers, MultiHashStage, PipelineConfig, PipelineRunner,
    PipelineStats, SingleHashStage,
};

/// Combined output of a run together with its failures and counters.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Sorted, `_`-joined MultiHash values of every seed that succeeded.
    pub combined: CombinedResult,
    /// Seeds excluded from `combined`, ordered by seed.
    pub failures: Vec<HashComputationError>,
    /// Counters for this run.
    pub stats: PipelineStats,
}

/// SingleHash → MultiHash → Combine over a fixed pair of primitives.
///
/// A signer can be run any number of times; every run builds a fresh chain
/// of workers and queues.
///
/// ```
/// use pipeline::{PipelineConfig, Signer};
///
/// let signer = Signer::new(PipelineConfig::instant());
/// assert_eq!(signer.run(Vec::new()).unwrap(), "");
/// ```
pub struct Signer {
    hashers: Arc<Hashers>,
    config: PipelineConfig,
}

impl Signer {
    /// CRC-32 and MD5 primitives configured from `config`, gated by the
    /// process-wide limiter.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            hashers: Arc::new(Hashers::reference(&config)),
            config,
        }
    }

    /// Starts a builder for injecting primitives or a private limiter.
    pub fn builder() -> SignerBuilder {
        SignerBuilder::default()
    }

    /// The configuration runs use.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The primitives and limiter runs use.
    #[must_use]
    pub const fn hashers(&self) -> &Arc<Hashers> {
        &self.hashers
    }

    /// Runs every seed and returns the combined string.
    ///
    /// If any seed failed, returns [`PipelineError::SeedsFailed`] carrying
    /// the combined output of the other seeds.
    pub fn run(&self, seeds: impl IntoIterator<Item = u64>) -> Result<String, PipelineError> {
        let report = self.run_report(seeds)?;
        if report.failures.is_empty() {
            Ok(report.combined.value)
        } else {
            Err(PipelineError::SeedsFailed {
                combined: report.combined.value,
                failures: report.failures,
                total: report.stats.seeds,
            })
        }
    }

    /// Runs every seed and reports the outcome without treating seed
    /// failures as an error.
    pub fn run_report(
        &self,
        seeds: impl IntoIterator<Item = u64>,
    ) -> Result<PipelineReport, PipelineError> {
        let (fast_before, slow_before) = self.hashers.call_counts();
        let contended_before = self.hashers.limiter().stats().contended;

        let output = PipelineRunner::new(&self.config)
            .stage(SingleHashStage::new(Arc::clone(&self.hashers)))
            .stage(MultiHashStage::new(Arc::clone(&self.hashers)))
            .stage(CombineStage::new())
            .run(seeds)?;

        let combined = output.outputs.into_iter().next().unwrap_or_default();
        let (fast_after, slow_after) = self.hashers.call_counts();
        let limiter = self.hashers.limiter().stats();
        let stats = PipelineStats {
            seeds: output.submitted,
            combined: combined.parts,
            failed: output.failures.len(),
            fast_calls: fast_after.saturating_sub(fast_before),
            slow_calls: slow_after.saturating_sub(slow_before),
            limiter_contended: limiter.contended.saturating_sub(contended_before),
            limiter_lifetime_peak: limiter.peak_in_flight,
            elapsed: output.elapsed,
        };
        stats.log();

        Ok(PipelineReport {
            combined,
            failures: output.failures,
            stats,
        })
    }
}

impl Default for Signer {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("hashers", &self.hashers)
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for a [`Signer`] with injected primitives.
///
/// Anything not set falls back to the reference primitives configured from
/// the builder's [`PipelineConfig`] and to [`limiter::shared`].
#[derive(Default)]
pub struct SignerBuilder {
    config: PipelineConfig,
    fast: Option<Arc<dyn FastHasher>>,
    slow: Option<Arc<dyn SlowHasher>>,
    limiter: Option<Arc<RateLimiter>>,
}

impl SignerBuilder {
    /// Sets the pipeline configuration.
    #[must_use]
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the fast primitive.
    #[must_use]
    pub fn fast_hasher(mut self, fast: Arc<dyn FastHasher>) -> Self {
        self.fast = Some(fast);
        self
    }

    /// Replaces the slow primitive.
    #[must_use]
    pub fn slow_hasher(mut self, slow: Arc<dyn SlowHasher>) -> Self {
        self.slow = Some(slow);
        self
    }

    /// Gates slow calls with `limiter` instead of the process-wide one.
    #[must_use]
    pub fn limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Assembles the signer.
    pub fn build(self) -> Signer {
        let config = self.config;
        let fast: Arc<dyn FastHasher> = match self.fast {
            Some(fast) => fast,
            None => Arc::new(Crc32Hasher::new(&config.salt, config.fast_latency)),
        };
        let slow: Arc<dyn SlowHasher> = match self.slow {
            Some(slow) => slow,
            None => Arc::new(Md5Hasher::new(&config.salt, config.slow_latency)),
        };
        let limiter = self.limiter.unwrap_or_else(limiter::shared);
        Signer {
            hashers: Arc::new(Hashers::new(fast, slow, limiter)),
            config,
        }
    }
}

impl fmt::Debug for SignerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerBuilder")
            .field("config", &self.config)
            .field("fast", &self.fast.is_some())
            .field("slow", &self.slow.is_some())
            .field("limiter", &self.limiter)
            .finish()
    }
}
