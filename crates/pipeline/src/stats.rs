use std::fmt;
use std::time::Duration;

/// Counters describing one [`Signer`](crate::Signer) run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineStats {
    /// Seeds submitted.
    pub seeds: usize,
    /// MultiHash results that reached the combined output.
    pub combined: usize,
    /// Seeds excluded because a primitive failed.
    pub failed: usize,
    /// Fast primitive calls made during the run.
    pub fast_calls: u64,
    /// Slow primitive calls made during the run.
    pub slow_calls: u64,
    /// Slow calls that had to wait for the limiter during the run.
    pub limiter_contended: u64,
    /// Highest number of concurrent limiter holders over the limiter's
    /// whole lifetime, not just this run. The limiter is usually shared
    /// by every signer in the process.
    pub limiter_lifetime_peak: usize,
    /// Wall time of the run.
    pub elapsed: Duration,
}

impl PipelineStats {
    /// Emits the counters as a single info event.
    pub fn log(&self) {
        tracing::info!(
            target: "signer::runner",
            seeds = self.seeds,
            combined = self.combined,
            failed = self.failed,
            fast_calls = self.fast_calls,
            slow_calls = self.slow_calls,
            limiter_contended = self.limiter_contended,
            limiter_lifetime_peak = self.limiter_lifetime_peak,
            elapsed_ms = self.elapsed.as_millis(),
            "run statistics"
        );
    }
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seeds: {} combined: {} failed: {} fast calls: {} slow calls: {} \
             limiter waits: {} limiter lifetime peak: {} elapsed: {:.3}s",
            self.seeds,
            self.combined,
            self.failed,
            self.fast_calls,
            self.slow_calls,
            self.limiter_contended,
            self.limiter_lifetime_peak,
            self.elapsed.as_secs_f64()
        )
    }
}
