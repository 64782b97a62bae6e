//! Error types for the signer pipeline.

use std::fmt;
use std::io;

use checksums::HashError;
use limiter::LimiterError;
use thiserror::Error;

/// A primitive failed while processing one seed.
///
/// Only that seed is excluded from the combined result.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("seed {seed} failed in {stage}: {source}")]
pub struct HashComputationError {
    /// Seed whose computation failed.
    pub seed: u64,
    /// Name of the stage that observed the failure.
    pub stage: &'static str,
    /// The primitive's report.
    #[source]
    pub source: HashError,
}

/// Errors returned by [`Signer`](crate::Signer) and
/// [`PipelineRunner`](crate::PipelineRunner).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Some seeds failed. `combined` holds the result over the seeds that
    /// succeeded.
    #[error("{} of {} seeds failed: {}", .failures.len(), .total, FailureList(.failures))]
    SeedsFailed {
        /// Combined output of the surviving seeds.
        combined: String,
        /// One entry per failed seed, ordered by seed.
        failures: Vec<HashComputationError>,
        /// Number of seeds submitted.
        total: usize,
    },
    /// The slow-hash admission gate could not be acquired.
    #[error("rate limiter acquisition failed: {0}")]
    LimiterAcquisition(#[from] LimiterError),
    /// A stage worker panicked.
    #[error("{stage} worker panicked")]
    StagePanicked {
        /// Name of the stage.
        stage: &'static str,
    },
    /// The OS refused to start a worker thread.
    #[error("failed to spawn {stage} worker: {source}")]
    Spawn {
        /// Name of the stage or helper thread.
        stage: &'static str,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    /// Returns `true` for errors that abort the whole run rather than
    /// excluding individual seeds.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::SeedsFailed { .. })
    }

    /// Seeds that failed, if this is a partial-failure report.
    #[must_use]
    pub fn failed_seeds(&self) -> Vec<u64> {
        match self {
            Self::SeedsFailed { failures, .. } => failures.iter().map(|f| f.seed).collect(),
            _ => Vec::new(),
        }
    }
}

struct FailureList<'a>(&'a [HashComputationError]);

impl fmt::Display for FailureList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, failure) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(seed: u64) -> HashComputationError {
        HashComputationError {
            seed,
            stage: "single_hash",
            source: HashError::new("md5", "overheated"),
        }
    }

    #[test]
    fn seed_failure_display() {
        assert_eq!(
            failure(1).to_string(),
            "seed 1 failed in single_hash: md5 hash failed: overheated"
        );
    }

    #[test]
    fn seeds_failed_lists_every_seed() {
        let err = PipelineError::SeedsFailed {
            combined: String::new(),
            failures: vec![failure(1), failure(4)],
            total: 5,
        };
        let text = err.to_string();
        assert!(text.starts_with("2 of 5 seeds failed: seed 1"));
        assert!(text.contains("; seed 4"));
        assert_eq!(err.failed_seeds(), vec![1, 4]);
        assert!(!err.is_fatal());
    }

    #[test]
    fn limiter_errors_are_fatal() {
        let err = PipelineError::from(LimiterError::Poisoned);
        assert!(err.is_fatal());
        assert!(err.failed_seeds().is_empty());
        assert_eq!(
            err.to_string(),
            "rate limiter acquisition failed: rate limiter state poisoned"
        );
    }
}
