use std::num::NonZeroUsize;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::{LimiterError, LimiterStats, Permit};

#[derive(Debug, Default)]
struct State {
    in_flight: usize,
    stats: LimiterStats,
}

/// Counting admission gate with blocking acquisition.
///
/// A limiter built with [`RateLimiter::exclusive`] admits exactly one holder
/// at a time, which is how the slow hash primitive is guarded. Waiters park
/// on a condition variable; nobody spins or sleeps between retries.
///
/// # Examples
///
/// ```
/// use limiter::RateLimiter;
///
/// let gate = RateLimiter::exclusive();
/// let permit = gate.acquire().unwrap();
/// assert!(gate.try_acquire().is_none());
/// drop(permit);
/// assert!(gate.try_acquire().is_some());
/// ```
#[derive(Debug)]
pub struct RateLimiter {
    capacity: NonZeroUsize,
    state: Mutex<State>,
    released: Condvar,
}

impl RateLimiter {
    /// Creates a limiter admitting up to `capacity` concurrent holders.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            state: Mutex::new(State::default()),
            released: Condvar::new(),
        }
    }

    /// Creates a limiter admitting a single holder.
    #[must_use]
    pub fn exclusive() -> Self {
        Self::new(NonZeroUsize::MIN)
    }

    /// Maximum number of concurrent holders.
    #[must_use]
    pub const fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Blocks until a slot is free and returns a permit for it.
    pub fn acquire(&self) -> Result<Permit<'_>, LimiterError> {
        let mut state = self.lock()?;
        let contended = state.in_flight >= self.capacity.get();
        if contended {
            tracing::trace!(target: "signer::limiter", in_flight = state.in_flight, "waiting for slot");
        }
        while state.in_flight >= self.capacity.get() {
            state = self
                .released
                .wait(state)
                .map_err(|_| LimiterError::Poisoned)?;
        }
        Ok(self.admit(&mut state, contended))
    }

    /// Blocks for at most `timeout` waiting for a slot.
    pub fn acquire_timeout(&self, timeout: Duration) -> Result<Permit<'_>, LimiterError> {
        let state = self.lock()?;
        let contended = state.in_flight >= self.capacity.get();
        let (mut state, result) = self
            .released
            .wait_timeout_while(state, timeout, |state| {
                state.in_flight >= self.capacity.get()
            })
            .map_err(|_| LimiterError::Poisoned)?;
        if result.timed_out() && state.in_flight >= self.capacity.get() {
            return Err(LimiterError::TimedOut(timeout));
        }
        Ok(self.admit(&mut state, contended))
    }

    /// Returns a permit only if a slot is free right now.
    pub fn try_acquire(&self) -> Option<Permit<'_>> {
        let mut state = self.lock().ok()?;
        if state.in_flight >= self.capacity.get() {
            return None;
        }
        Some(self.admit(&mut state, false))
    }

    /// Runs `op` while holding a permit.
    pub fn with_permit<R>(&self, op: impl FnOnce() -> R) -> Result<R, LimiterError> {
        let _permit = self.acquire()?;
        Ok(op())
    }

    /// Number of permits currently held.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.lock_unpoisoned().in_flight
    }

    /// Snapshot of the admission counters.
    #[must_use]
    pub fn stats(&self) -> LimiterStats {
        self.lock_unpoisoned().stats
    }

    fn admit(&self, state: &mut State, contended: bool) -> Permit<'_> {
        state.in_flight += 1;
        state.stats.admissions += 1;
        if contended {
            state.stats.contended += 1;
        }
        state.stats.peak_in_flight = state.stats.peak_in_flight.max(state.in_flight);
        debug_assert!(state.in_flight <= self.capacity.get());
        Permit::new(self)
    }

    pub(super) fn release(&self) {
        let mut state = self.lock_unpoisoned();
        state.in_flight = state.in_flight.saturating_sub(1);
        drop(state);
        self.released.notify_one();
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, LimiterError> {
        self.state.lock().map_err(|_| LimiterError::Poisoned)
    }

    // Release must succeed even after poisoning or a waiter would hang.
    fn lock_unpoisoned(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::exclusive()
    }
}
