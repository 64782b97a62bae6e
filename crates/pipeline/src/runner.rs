//! Stage wiring and run supervision.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

use crate::error::{HashComputationError, PipelineError};
use crate::{PipelineConfig, SeedValue, Stage, StageContext};

const FEEDER: &str = "seed-feeder";

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunOutput<T> {
    /// Items that left the last stage, in arrival order.
    pub outputs: Vec<T>,
    /// Per-seed failures, ordered by seed.
    pub failures: Vec<HashComputationError>,
    /// Number of seeds pushed into the front queue.
    pub submitted: usize,
    /// Wall time from the first seed to the last worker exiting.
    pub elapsed: Duration,
}

/// Chain of stages joined by bounded queues, one worker thread per stage.
///
/// Workers start as soon as a stage is added and block on their empty input
/// queue until [`run`](Self::run) pushes the seeds. `T` is the item type
/// leaving the last stage added so far.
///
/// ```
/// use std::sync::Arc;
/// use pipeline::{
///     CombineStage, Hashers, MultiHashStage, PipelineConfig, PipelineRunner, SingleHashStage,
/// };
///
/// let config = PipelineConfig::instant();
/// let hashers = Arc::new(Hashers::reference(&config));
/// let output = PipelineRunner::new(&config)
///     .stage(SingleHashStage::new(Arc::clone(&hashers)))
///     .stage(MultiHashStage::new(hashers))
///     .stage(CombineStage::new())
///     .run([0])
///     .unwrap();
/// assert_eq!(
///     output.outputs[0].value,
///     "29568666068035183841425683795340791879727309630931025356555"
/// );
/// ```
#[derive(Debug)]
pub struct PipelineRunner<T> {
    capacity: usize,
    ctx: Arc<StageContext>,
    failures: Receiver<HashComputationError>,
    source: Sender<SeedValue>,
    tail: Receiver<T>,
    workers: Vec<(&'static str, JoinHandle<()>)>,
    spawn_error: Option<PipelineError>,
}

impl PipelineRunner<SeedValue> {
    /// Creates an empty chain whose tail is the seed queue.
    pub fn new(config: &PipelineConfig) -> Self {
        let capacity = config.effective_queue_capacity();
        let (source, tail) = bounded(capacity);
        let (failure_tx, failures) = unbounded();
        Self {
            capacity,
            ctx: Arc::new(StageContext::new(failure_tx, config.max_in_flight)),
            failures,
            source,
            tail,
            workers: Vec::new(),
            spawn_error: None,
        }
    }
}

impl<T: Send + 'static> PipelineRunner<T> {
    /// Appends `stage`, starting its worker on the current tail queue.
    pub fn stage<S>(mut self, stage: S) -> PipelineRunner<S::Output>
    where
        S: Stage<Input = T>,
    {
        let (output, tail) = bounded(self.capacity);
        let name = stage.name();

        if self.spawn_error.is_none() {
            let input = self.tail;
            let ctx = Arc::clone(&self.ctx);
            let spawned = thread::Builder::new()
                .name(format!("stage-{name}"))
                .spawn(move || {
                    tracing::debug!(target: "signer::runner", stage = name, "worker started");
                    stage.run(input, output, &ctx);
                    tracing::debug!(target: "signer::runner", stage = name, "worker finished");
                });
            match spawned {
                Ok(handle) => self.workers.push((name, handle)),
                Err(source) => {
                    self.ctx.cancel();
                    self.spawn_error = Some(PipelineError::Spawn {
                        stage: name,
                        source,
                    });
                }
            }
        }

        PipelineRunner {
            capacity: self.capacity,
            ctx: self.ctx,
            failures: self.failures,
            source: self.source,
            tail,
            workers: self.workers,
            spawn_error: self.spawn_error,
        }
    }

    /// Run-wide context shared with the workers.
    #[must_use]
    pub fn context(&self) -> &StageContext {
        &self.ctx
    }

    /// Pushes `seeds` into the front queue, closes it and waits for every
    /// worker to exit.
    ///
    /// Seed failures are returned inside [`RunOutput`]; only fatal errors
    /// make this return `Err`.
    pub fn run(self, seeds: impl IntoIterator<Item = u64>) -> Result<RunOutput<T>, PipelineError> {
        let Self {
            ctx,
            failures,
            source,
            tail,
            workers,
            spawn_error,
            ..
        } = self;
        let start = Instant::now();

        if let Some(error) = spawn_error {
            drop(source);
            drop(tail);
            join_workers(&ctx, workers);
            return Err(error);
        }

        let seeds: Vec<u64> = seeds.into_iter().collect();
        let submitted = seeds.len();
        tracing::info!(target: "signer::runner", seeds = submitted, stages = workers.len(), "pipeline started");

        let feeder_ctx = Arc::clone(&ctx);
        let feeder = thread::Builder::new()
            .name(FEEDER.to_owned())
            .spawn(move || feed(&feeder_ctx, &source, seeds));
        let feeder = match feeder {
            Ok(handle) => Some(handle),
            Err(source) => {
                ctx.abort(PipelineError::Spawn {
                    stage: FEEDER,
                    source,
                });
                None
            }
        };

        // Drain while the workers run so a full tail queue never stalls them.
        let outputs: Vec<T> = tail.iter().collect();

        if let Some(feeder) = feeder
            && feeder.join().is_err()
        {
            ctx.abort(PipelineError::StagePanicked { stage: FEEDER });
        }
        join_workers(&ctx, workers);

        if let Some(error) = ctx.take_fatal() {
            return Err(error);
        }

        let mut failures: Vec<HashComputationError> = failures.try_iter().collect();
        failures.sort_by_key(|failure| failure.seed);
        let elapsed = start.elapsed();
        tracing::info!(
            target: "signer::runner",
            outputs = outputs.len(),
            failed = failures.len(),
            elapsed_ms = elapsed.as_millis(),
            "pipeline drained"
        );

        Ok(RunOutput {
            outputs,
            failures,
            submitted,
            elapsed,
        })
    }
}

fn feed(ctx: &StageContext, source: &Sender<SeedValue>, seeds: Vec<u64>) {
    for seed in seeds {
        if ctx.is_cancelled() {
            break;
        }
        tracing::trace!(target: "signer::runner", seed, "seed submitted");
        if source.send(SeedValue::new(seed)).is_err() {
            break;
        }
    }
}

fn join_workers(ctx: &StageContext, workers: Vec<(&'static str, JoinHandle<()>)>) {
    for (stage, handle) in workers {
        if handle.join().is_err() {
            ctx.abort(PipelineError::StagePanicked { stage });
        }
    }
}
