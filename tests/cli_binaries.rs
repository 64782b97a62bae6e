use assert_cmd::Command;
use pipeline::{PipelineConfig, Signer};
use predicates::prelude::*;

const SEED_0: &str = "29568666068035183841425683795340791879727309630931025356555";

fn signer() -> Command {
    let mut command = Command::cargo_bin("signer").expect("signer binary is built");
    command.args(["--fast-latency-ms", "0", "--slow-latency-ms", "0"]);
    command
}

#[test]
fn signer_help_lists_usage() {
    Command::cargo_bin("signer")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--count"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn signer_prints_reference_signature() {
    signer()
        .arg("0")
        .assert()
        .code(0)
        .stdout(format!("{SEED_0}\n"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn signer_matches_library_output() {
    let expected = Signer::new(PipelineConfig::instant()).run(0..5).unwrap();
    signer()
        .args(["--count", "5", "--max-in-flight", "2", "--queue-capacity", "1"])
        .assert()
        .success()
        .stdout(format!("{expected}\n"));
}

#[test]
fn signer_output_ignores_seed_order() {
    let forward = signer().args(["3", "1", "2"]).output().unwrap();
    let backward = signer().args(["2", "1", "3"]).output().unwrap();
    assert!(forward.status.success());
    assert_eq!(forward.stdout, backward.stdout);
}

#[test]
fn signer_verbose_logs_to_stderr() {
    signer()
        .args(["-vv", "0"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(format!("{SEED_0}\n"))
        .stderr(predicate::str::contains("single hash result"))
        .stderr(predicate::str::contains("multi hash result"));
}

#[test]
fn signer_stats_report_calls() {
    signer()
        .args(["--stats", "0", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("fast calls: 16"))
        .stderr(predicate::str::contains("slow calls: 2"));
}
