//! Pipeline stages.
//!
//! A [`Stage`] owns one worker thread. It drains its input queue until the
//! upstream closes it, sends results downstream, and returns, which drops
//! its output sender and closes the queue for the next stage.
//!
//! The associated `Input`/`Output` types pin each stage to its neighbours:
//! [`PipelineRunner::stage`](crate::PipelineRunner::stage) only accepts a
//! stage whose input matches the previous stage's output.

mod combine;
mod multi_hash;
mod single_hash;

pub use combine::CombineStage;
pub use multi_hash::{MULTI_HASH_FAN_OUT, MultiHashStage};
pub use single_hash::SingleHashStage;

use crossbeam_channel::{Receiver, Sender};

use crate::StageContext;

/// One concurrent step of the pipeline.
pub trait Stage: Send + 'static {
    /// Items consumed from the upstream queue.
    type Input: Send + 'static;
    /// Items produced for the downstream queue.
    type Output: Send + 'static;

    /// Short name used for thread names, logs and error reports.
    fn name(&self) -> &'static str;

    /// Processes `input` until it is closed.
    ///
    /// Per-seed failures and fatal errors are reported through `ctx`.
    /// Returning drops `output`, which signals completion downstream.
    fn run(self, input: Receiver<Self::Input>, output: Sender<Self::Output>, ctx: &StageContext);
}
