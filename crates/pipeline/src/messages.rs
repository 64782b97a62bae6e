//! Typed payloads for each stage boundary.
//!
//! Every boundary carries its own type, so a stage can only be wired behind a
//! stage producing exactly what it consumes. Each payload keeps the seed it
//! descends from so failures can be attributed.
//!
//! ```text
//! SeedValue ─▶ SingleHashResult ─▶ MultiHashResult ─▶ CombinedResult
//! ```

use std::fmt;

/// One pipeline input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeedValue {
    /// The seed integer.
    pub seed: u64,
}

impl SeedValue {
    /// Wraps a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Textual form hashed by the first stage.
    #[must_use]
    pub fn data(&self) -> String {
        self.seed.to_string()
    }
}

impl fmt::Display for SeedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.seed.fmt(f)
    }
}

/// `fast(seed) + "~" + fast(slow(seed))` for one seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleHashResult {
    /// Seed this result descends from.
    pub seed: u64,
    /// The joined digest text.
    pub value: String,
}

/// Six fast digests of a [`SingleHashResult`], concatenated in index order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiHashResult {
    /// Seed this result descends from.
    pub seed: u64,
    /// The concatenated digest text.
    pub value: String,
}

/// Terminal output of the sink.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombinedResult {
    /// Sorted, `_`-joined MultiHash values.
    pub value: String,
    /// Number of MultiHash values that went into `value`.
    pub parts: usize,
}
