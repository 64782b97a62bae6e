use std::panic;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use super::Stage;
use crate::hashers::{Hashers, StepError};
use crate::{HashComputationError, MultiHashResult, PipelineError, SingleHashResult, StageContext};

const NAME: &str = "multi_hash";

/// Number of indexed fast-hash branches per MultiHash item.
pub const MULTI_HASH_FAN_OUT: usize = 6;

/// Second stage: concatenation of `fast(k + item)` for each branch index `k`.
///
/// All branches of an item run at once. The digests are joined in index
/// order no matter which branch finishes first, and an item with any failed
/// branch produces no output.
#[derive(Debug, Clone)]
pub struct MultiHashStage {
    hashers: Arc<Hashers>,
}

impl MultiHashStage {
    /// Creates the stage over the given primitives.
    pub fn new(hashers: Arc<Hashers>) -> Self {
        Self { hashers }
    }

    /// Computes one item's result.
    pub fn hash(&self, item: &SingleHashResult) -> Result<MultiHashResult, StepError> {
        let hashers = &self.hashers;
        let digests = thread::scope(|scope| {
            let branches: Vec<_> = (0..MULTI_HASH_FAN_OUT)
                .map(|index| {
                    let data = format!("{index}{}", item.value);
                    scope.spawn(move || {
                        let digest = hashers.fast(data.as_bytes());
                        if let Ok(digest) = &digest {
                            tracing::debug!(
                                target: "signer::stage::multi_hash",
                                seed = item.seed,
                                index,
                                %digest,
                                "crc32(index + single hash)"
                            );
                        }
                        digest
                    })
                })
                .collect();

            // Joining in spawn order is what fixes the concatenation order.
            branches
                .into_iter()
                .map(|branch| branch.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
                .collect::<Result<Vec<_>, _>>()
        })?;

        let value = digests.concat();
        tracing::info!(target: "signer::stage::multi_hash", seed = item.seed, %value, "multi hash result");
        Ok(MultiHashResult {
            seed: item.seed,
            value,
        })
    }
}

impl Stage for MultiHashStage {
    type Input = SingleHashResult;
    type Output = MultiHashResult;

    fn name(&self) -> &'static str {
        NAME
    }

    fn run(
        self,
        input: Receiver<SingleHashResult>,
        output: Sender<MultiHashResult>,
        ctx: &StageContext,
    ) {
        ctx.for_each_concurrent(NAME, &input, |item| match self.hash(&item) {
            Ok(result) => {
                if output.send(result).is_err() {
                    ctx.cancel();
                }
            }
            Err(StepError::Hash(source)) => ctx.report(HashComputationError {
                seed: item.seed,
                stage: NAME,
                source,
            }),
            Err(StepError::Limiter(error)) => ctx.abort(PipelineError::LimiterAcquisition(error)),
        });
    }
}
