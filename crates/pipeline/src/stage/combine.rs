use crossbeam_channel::{Receiver, Sender};

use super::Stage;
use crate::{CombinedResult, MultiHashResult, StageContext};

/// Sink: sorts every MultiHash value and joins them with `_`.
///
/// Produces exactly one [`CombinedResult`] once the upstream queue closes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombineStage;

impl CombineStage {
    /// Creates the sink.
    pub const fn new() -> Self {
        Self
    }

    /// Sorts and joins `results`.
    ///
    /// The output depends only on the multiset of values, never on their
    /// arrival order.
    pub fn combine(results: impl IntoIterator<Item = MultiHashResult>) -> CombinedResult {
        let mut values: Vec<String> = results.into_iter().map(|result| result.value).collect();
        values.sort();
        CombinedResult {
            parts: values.len(),
            value: values.join("_"),
        }
    }
}

impl Stage for CombineStage {
    type Input = MultiHashResult;
    type Output = CombinedResult;

    fn name(&self) -> &'static str {
        "combine"
    }

    fn run(self, input: Receiver<MultiHashResult>, output: Sender<CombinedResult>, _ctx: &StageContext) {
        let combined = Self::combine(input.iter());
        tracing::info!(
            target: "signer::combine",
            parts = combined.parts,
            value = %combined.value,
            "combined result"
        );
        // The runner is the only receiver; if it is gone there is nobody to tell.
        let _ = output.send(combined);
    }
}
