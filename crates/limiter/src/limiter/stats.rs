/// Admission counters accumulated over a limiter's lifetime.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LimiterStats {
    /// Number of permits granted.
    pub admissions: u64,
    /// Number of admissions that had to wait for a slot.
    pub contended: u64,
    /// Highest number of permits held at the same time.
    pub peak_in_flight: usize,
}
