use super::*;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

fn nz(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).expect("non-zero value required")
}

#[test]
fn exclusive_limiter_has_capacity_one() {
    assert_eq!(RateLimiter::exclusive().capacity().get(), 1);
    assert_eq!(RateLimiter::default().capacity().get(), 1);
}

#[test]
fn permit_releases_on_drop() {
    let gate = RateLimiter::exclusive();
    {
        let _permit = gate.acquire().expect("slot free");
        assert_eq!(gate.in_flight(), 1);
    }
    assert_eq!(gate.in_flight(), 0);
}

#[test]
fn try_acquire_respects_capacity() {
    let gate = RateLimiter::new(nz(2));
    let first = gate.try_acquire().expect("first slot");
    let second = gate.try_acquire().expect("second slot");
    assert!(gate.try_acquire().is_none());
    drop(first);
    assert!(gate.try_acquire().is_some());
    drop(second);
}

#[test]
fn acquire_timeout_expires_while_held() {
    let gate = RateLimiter::exclusive();
    let _held = gate.acquire().expect("slot free");
    let err = gate
        .acquire_timeout(Duration::from_millis(10))
        .expect_err("slot is held");
    assert_eq!(err, LimiterError::TimedOut(Duration::from_millis(10)));
}

#[test]
fn acquire_timeout_succeeds_when_free() {
    let gate = RateLimiter::exclusive();
    assert!(gate.acquire_timeout(Duration::from_millis(10)).is_ok());
}

#[test]
fn with_permit_returns_closure_value() {
    let gate = RateLimiter::exclusive();
    let value = gate.with_permit(|| 42).expect("slot free");
    assert_eq!(value, 42);
    assert_eq!(gate.in_flight(), 0);
}

#[test]
fn release_happens_when_holder_panics() {
    let gate = Arc::new(RateLimiter::exclusive());
    let worker = {
        let gate = Arc::clone(&gate);
        thread::spawn(move || {
            let _permit = gate.acquire().expect("slot free");
            panic!("holder failed");
        })
    };
    assert!(worker.join().is_err());
    assert_eq!(gate.in_flight(), 0);
    assert!(gate.acquire().is_ok());
}

#[test]
fn blocked_waiter_is_admitted_after_release() {
    let gate = Arc::new(RateLimiter::exclusive());
    let permit = gate.acquire().expect("slot free");
    let admitted = Arc::new(AtomicUsize::new(0));

    let waiter = {
        let gate = Arc::clone(&gate);
        let admitted = Arc::clone(&admitted);
        thread::spawn(move || {
            let _permit = gate.acquire().expect("eventually admitted");
            admitted.fetch_add(1, Ordering::SeqCst);
        })
    };

    thread::sleep(Duration::from_millis(20));
    assert_eq!(admitted.load(Ordering::SeqCst), 0);
    drop(permit);
    waiter.join().expect("waiter joins");
    assert_eq!(admitted.load(Ordering::SeqCst), 1);
    assert_eq!(gate.stats().contended, 1);
}

#[test]
fn stats_track_admissions_and_peak() {
    let gate = RateLimiter::new(nz(3));
    let a = gate.acquire().unwrap();
    let b = gate.acquire().unwrap();
    drop(a);
    drop(b);
    let _c = gate.acquire().unwrap();

    let stats = gate.stats();
    assert_eq!(stats.admissions, 3);
    assert_eq!(stats.peak_in_flight, 2);
    assert_eq!(stats.contended, 0);
}

#[test]
fn shared_returns_same_instance() {
    let a = shared();
    let b = shared();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.capacity().get(), 1);
}

#[test]
fn permit_reports_its_limiter() {
    let gate = RateLimiter::exclusive();
    let permit = gate.acquire().unwrap();
    assert!(std::ptr::eq(permit.limiter(), &gate));
    assert!(format!("{permit:?}").contains("capacity"));
}
