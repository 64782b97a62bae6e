use std::panic;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use super::Stage;
use crate::hashers::{Hashers, StepError};
use crate::{HashComputationError, PipelineError, SeedValue, SingleHashResult, StageContext};

const NAME: &str = "single_hash";

/// First stage: `fast(seed) + "~" + fast(slow(seed))`.
///
/// Each seed runs on its own sub-task. Inside it, `fast(seed)` runs on a
/// branch thread while the current thread waits for the limiter, computes
/// `slow(seed)` and then `fast(slow(seed))`.
#[derive(Debug, Clone)]
pub struct SingleHashStage {
    hashers: Arc<Hashers>,
}

impl SingleHashStage {
    /// Creates the stage over the given primitives.
    pub fn new(hashers: Arc<Hashers>) -> Self {
        Self { hashers }
    }

    /// Computes one seed's result.
    pub fn hash(&self, seed: SeedValue) -> Result<SingleHashResult, StepError> {
        let data = seed.data();
        tracing::debug!(target: "signer::stage::single_hash", seed = seed.seed, %data, "data");

        let (fast, fast_of_slow) = thread::scope(|scope| {
            let fast = scope.spawn(|| self.hashers.fast(data.as_bytes()));
            let fast_of_slow = self.hashers.slow(data.as_bytes()).and_then(|slow| {
                tracing::debug!(target: "signer::stage::single_hash", seed = seed.seed, %slow, "md5(data)");
                self.hashers.fast(slow.as_bytes())
            });
            let fast = fast.join().unwrap_or_else(|payload| panic::resume_unwind(payload));
            (fast, fast_of_slow)
        });

        let fast_of_slow = fast_of_slow?;
        tracing::debug!(target: "signer::stage::single_hash", seed = seed.seed, %fast_of_slow, "crc32(md5(data))");
        let fast = fast?;
        tracing::debug!(target: "signer::stage::single_hash", seed = seed.seed, %fast, "crc32(data)");

        let value = format!("{fast}~{fast_of_slow}");
        tracing::info!(target: "signer::stage::single_hash", seed = seed.seed, %value, "single hash result");
        Ok(SingleHashResult {
            seed: seed.seed,
            value,
        })
    }
}

impl Stage for SingleHashStage {
    type Input = SeedValue;
    type Output = SingleHashResult;

    fn name(&self) -> &'static str {
        NAME
    }

    fn run(self, input: Receiver<SeedValue>, output: Sender<SingleHashResult>, ctx: &StageContext) {
        ctx.for_each_concurrent(NAME, &input, |seed| match self.hash(seed) {
            Ok(result) => {
                if output.send(result).is_err() {
                    ctx.cancel();
                }
            }
            Err(StepError::Hash(source)) => ctx.report(HashComputationError {
                seed: seed.seed,
                stage: NAME,
                source,
            }),
            Err(StepError::Limiter(error)) => ctx.abort(PipelineError::LimiterAcquisition(error)),
        });
    }
}
