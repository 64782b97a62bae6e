//! Runs with deterministic stand-in primitives.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use checksums::{FnHasher, HashError};
use limiter::RateLimiter;
use pipeline::{PipelineConfig, PipelineError, Signer};
use proptest::prelude::*;

/// `len:data`
fn echo(data: &[u8]) -> Result<String, HashError> {
    Ok(format!("{}:{}", data.len(), String::from_utf8_lossy(data)))
}

fn reverse(data: &[u8]) -> Result<String, HashError> {
    Ok(String::from_utf8_lossy(data).chars().rev().collect())
}

fn signer_with(
    config: PipelineConfig,
    fast: impl Fn(&[u8]) -> Result<String, HashError> + Send + Sync + 'static,
    slow: impl Fn(&[u8]) -> Result<String, HashError> + Send + Sync + 'static,
) -> Signer {
    Signer::builder()
        .config(config)
        .fast_hasher(Arc::new(FnHasher::new("fast", fast)))
        .slow_hasher(Arc::new(FnHasher::new("slow", slow)))
        .limiter(Arc::new(RateLimiter::exclusive()))
        .build()
}

fn echo_signer() -> Signer {
    signer_with(PipelineConfig::instant(), echo, reverse)
}

const SEED_0_MULTI: &str = "8:01:0~1:08:11:0~1:08:21:0~1:08:31:0~1:08:41:0~1:08:51:0~1:0";
const SEED_1_MULTI: &str = "8:01:1~1:18:11:1~1:18:21:1~1:18:31:1~1:18:41:1~1:18:51:1~1:1";

#[test]
fn seeds_zero_and_one_match_hand_computed_output() {
    // seed 0: fast("0") = "1:0", slow("0") = "0", fast("0") = "1:0"
    //   single = "1:0~1:0", multi[k] = fast(k + single) = "8:" + k + single
    let combined = echo_signer().run([0, 1]).unwrap();
    assert_eq!(combined, format!("{SEED_0_MULTI}_{SEED_1_MULTI}"));
}

#[test]
fn multi_digit_seed_goes_through_reverse() {
    // fast("12") = "2:12", slow("12") = "21", fast("21") = "2:21"
    // single = "2:12~2:21" (9 bytes), multi[k] = "10:" + k + single
    let expected: String = (0..6).map(|k| format!("10:{k}2:12~2:21")).collect();
    assert_eq!(echo_signer().run([12]).unwrap(), expected);
}

#[test]
fn empty_seed_set_yields_empty_string() {
    assert_eq!(echo_signer().run(Vec::new()).unwrap(), "");
}

#[test]
fn single_seed_has_no_separator() {
    let combined = echo_signer().run([0]).unwrap();
    assert_eq!(combined, SEED_0_MULTI);
    assert!(!combined.contains('_'));
}

#[test]
fn slow_failure_excludes_only_that_seed() {
    let signer = signer_with(PipelineConfig::instant(), echo, |data: &[u8]| {
        if data == b"1" {
            Err(HashError::new("slow", "injected"))
        } else {
            reverse(data)
        }
    });

    match signer.run([0, 1]).unwrap_err() {
        PipelineError::SeedsFailed {
            combined,
            failures,
            total,
        } => {
            assert_eq!(combined, SEED_0_MULTI);
            assert_eq!(total, 2);
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].seed, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn fast_failure_in_multi_hash_excludes_only_that_seed() {
    // Only seed 1's MultiHash branch 4 sees this input.
    let signer = signer_with(
        PipelineConfig::instant(),
        |data: &[u8]| {
            if data == b"41:1~1:1" {
                Err(HashError::new("fast", "injected"))
            } else {
                echo(data)
            }
        },
        reverse,
    );

    let report = signer.run_report([0, 1]).unwrap();
    assert_eq!(report.combined.value, SEED_0_MULTI);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].seed, 1);
    assert_eq!(report.failures[0].stage, "multi_hash");
}

#[test]
fn every_seed_failing_still_returns_partial_error() {
    let signer = signer_with(PipelineConfig::instant(), echo, |_: &[u8]| {
        Err(HashError::new("slow", "offline"))
    });
    let err = signer.run(0..4).unwrap_err();
    assert_eq!(err.failed_seeds(), vec![0, 1, 2, 3]);
    assert!(!err.is_fatal());
}

#[test]
fn primitive_panic_stops_the_run() {
    let config = PipelineConfig::instant().with_max_in_flight(NonZeroUsize::new(1));
    let signer = signer_with(
        config,
        |data: &[u8]| {
            assert_ne!(data, b"0", "fast primitive fault");
            echo(data)
        },
        reverse,
    );

    let err = signer.run(0..40).unwrap_err();
    assert!(matches!(err, PipelineError::StagePanicked { stage: "single_hash" }));
    assert!(err.is_fatal());
    // Seed 0 is the only seed taken before the panic cancels the run.
    assert_eq!(signer.hashers().call_counts().1, 1);
}

#[test]
fn multi_hash_order_survives_slow_branch_zero() {
    let delayed = signer_with(PipelineConfig::instant(), |data: &[u8]| {
        // MultiHash branch 0 inputs start with '0' followed by the length prefix.
        if data.len() > 3 && data[0] == b'0' {
            thread::sleep(Duration::from_millis(40));
        }
        echo(data)
    }, reverse);

    assert_eq!(delayed.run([0, 1]).unwrap(), echo_signer().run([0, 1]).unwrap());
}

#[test]
fn limiter_never_admits_two_slow_calls() {
    let inside = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let (inside_seen, peak_seen) = (Arc::clone(&inside), Arc::clone(&peak));

    let signer = signer_with(PipelineConfig::instant(), echo, move |data: &[u8]| {
        let now = inside_seen.fetch_add(1, Ordering::SeqCst) + 1;
        peak_seen.fetch_max(now, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(2));
        inside_seen.fetch_sub(1, Ordering::SeqCst);
        reverse(data)
    });

    let report = signer.run_report(0..32).unwrap();
    assert_eq!(report.stats.slow_calls, 32);
    assert_eq!(peak.load(Ordering::SeqCst), 1);
    assert_eq!(inside.load(Ordering::SeqCst), 0);
    assert_eq!(report.stats.limiter_lifetime_peak, 1);
}

#[test]
fn runs_are_idempotent() {
    let signer = echo_signer();
    let first = signer.run(0..10).unwrap();
    let second = signer.run(0..10).unwrap();
    assert_eq!(first, second);
}

#[test]
fn duplicate_seeds_contribute_twice() {
    let combined = echo_signer().run([0, 0]).unwrap();
    assert_eq!(combined, format!("{SEED_0_MULTI}_{SEED_0_MULTI}"));
}

#[test]
fn bounded_in_flight_and_tiny_queues_do_not_change_output() {
    let expected = echo_signer().run(0..20).unwrap();
    let config = PipelineConfig::instant()
        .with_queue_capacity(1)
        .with_max_in_flight(NonZeroUsize::new(2));
    let constrained = signer_with(config, echo, reverse);
    assert_eq!(constrained.run(0..20).unwrap(), expected);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn output_is_invariant_under_permutation(
        seeds in prop::collection::vec(0u64..1_000, 0..12).prop_shuffle(),
    ) {
        let signer = echo_signer();
        let mut sorted = seeds.clone();
        sorted.sort_unstable();
        prop_assert_eq!(signer.run(seeds).unwrap(), signer.run(sorted).unwrap());
    }
}
