//! Run-wide state shared by every stage worker.

use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use limiter::RateLimiter;

use crate::error::{HashComputationError, PipelineError};

/// Failure reporting, cancellation and in-flight bounds for one run.
///
/// Per-seed failures travel to the runner on a side channel. The first
/// fatal error is kept and raises the cancellation flag, after which stages
/// stop taking new items.
#[derive(Debug)]
pub struct StageContext {
    failures: Sender<HashComputationError>,
    cancelled: AtomicBool,
    fatal: Mutex<Option<PipelineError>>,
    max_in_flight: Option<NonZeroUsize>,
    item_stack_size: Option<usize>,
}

impl StageContext {
    pub(crate) fn new(
        failures: Sender<HashComputationError>,
        max_in_flight: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            failures,
            cancelled: AtomicBool::new(false),
            fatal: Mutex::new(None),
            max_in_flight,
            item_stack_size: None,
        }
    }

    #[cfg(test)]
    pub(crate) const fn with_item_stack_size(mut self, size: usize) -> Self {
        self.item_stack_size = Some(size);
        self
    }

    /// Records a per-seed failure.
    pub fn report(&self, failure: HashComputationError) {
        tracing::warn!(
            target: "signer::runner",
            seed = failure.seed,
            stage = failure.stage,
            error = %failure.source,
            "seed excluded"
        );
        // The runner holds the receiver until every worker has exited.
        let _ = self.failures.send(failure);
    }

    /// Records a fatal error and cancels the run. Only the first fatal error
    /// is kept.
    pub fn abort(&self, error: PipelineError) {
        tracing::error!(target: "signer::runner", %error, "aborting pipeline");
        let mut slot = self.fatal.lock().unwrap_or_else(PoisonError::into_inner);
        slot.get_or_insert(error);
        drop(slot);
        self.cancel();
    }

    /// Asks every stage to stop taking new items.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether the run has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub(crate) fn take_fatal(&self) -> Option<PipelineError> {
        self.fatal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Drains `input`, running `work` for each item on its own scoped thread.
    ///
    /// Returns once the input is closed (or the run is cancelled) and every
    /// spawned item has finished. With `max_in_flight` set, at most that many
    /// items run at once; further items wait for a slot before being taken
    /// off the queue.
    ///
    /// A panicking item or a refused item thread aborts the run with
    /// [`PipelineError::StagePanicked`] or [`PipelineError::Spawn`] for
    /// `stage`, so no further items are taken.
    pub fn for_each_concurrent<T, F>(&self, stage: &'static str, input: &Receiver<T>, work: F)
    where
        T: Send,
        F: Fn(T) + Sync,
    {
        let gate = self.max_in_flight.map(RateLimiter::new);
        let work = &work;

        thread::scope(|scope| {
            loop {
                let permit = match gate.as_ref().map(RateLimiter::acquire).transpose() {
                    Ok(permit) => permit,
                    Err(error) => {
                        self.abort(error.into());
                        break;
                    }
                };
                if self.is_cancelled() {
                    break;
                }
                let Ok(item) = input.recv() else {
                    break;
                };
                // Cancellation may have happened while waiting on the queue.
                if self.is_cancelled() {
                    break;
                }

                let mut builder = thread::Builder::new().name(format!("{stage}-item"));
                if let Some(size) = self.item_stack_size {
                    builder = builder.stack_size(size);
                }
                let spawned = builder.spawn_scoped(scope, move || {
                    let _permit = permit;
                    if panic::catch_unwind(AssertUnwindSafe(|| work(item))).is_err() {
                        self.abort(PipelineError::StagePanicked { stage });
                    }
                });
                if let Err(source) = spawned {
                    self.abort(PipelineError::Spawn { stage, source });
                    break;
                }
            }
        });
    }
}
