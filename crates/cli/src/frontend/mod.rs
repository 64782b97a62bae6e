mod arguments;
mod command_builder;
mod render;


use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use clap::error::ErrorKind;
use logging::VerbosityConfig;
use pipeline::{PipelineConfig, Signer};

use arguments::{ArgumentError, ParsedArgs, parse_args};

/// Every seed combined.
pub const EXIT_OK: i32 = 0;
/// The command line could not be parsed.
pub const EXIT_USAGE: i32 = 1;
/// Some seeds failed; the combined output of the rest was printed.
pub const EXIT_PARTIAL: i32 = 2;
/// The pipeline aborted.
pub const EXIT_FATAL: i32 = 3;

const MAX_EXIT_CODE: i32 = 255;

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code. The combined signature goes to `stdout`;
/// diagnostics, seed failures and statistics go to `stderr`.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(ArgumentError::Clap(error))
            if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) =>
        {
            if write!(stdout, "{error}").is_err() {
                return EXIT_USAGE;
            }
            EXIT_OK
        }
        Err(error) => {
            let _ = render::usage_error(stderr, &error);
            EXIT_USAGE
        }
    }
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let mut verbosity = VerbosityConfig::from_verbose_level(parsed.verbosity);
    for flags in &parsed.log_flags {
        if let Err(reason) = verbosity.apply_flags(flags) {
            let _ = render::usage_error(stderr, &ArgumentError::LogFlag(reason));
            return EXIT_USAGE;
        }
    }
    // A subscriber installed earlier in this process (tests, embedding) wins.
    let _ = logging::init_tracing_from_env(&verbosity);

    let config = pipeline_config(&parsed);
    tracing::debug!(target: "signer::runner", ?config, seeds = parsed.seeds.len(), "configuration");

    let signer = Signer::new(config);
    let report = match signer.run_report(parsed.seeds) {
        Ok(report) => report,
        Err(error) => {
            let _ = render::fatal_error(stderr, &error);
            return EXIT_FATAL;
        }
    };

    if render::combined(stdout, &report.combined).is_err() {
        return EXIT_FATAL;
    }
    let _ = render::failures(stderr, &report.failures);
    if parsed.show_stats {
        let _ = render::stats(stderr, &report.stats);
    }

    if report.failures.is_empty() {
        EXIT_OK
    } else {
        EXIT_PARTIAL
    }
}

fn pipeline_config(parsed: &ParsedArgs) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    if let Some(salt) = &parsed.salt {
        config = config.with_salt(salt.as_str());
    }
    let fast = parsed
        .fast_latency_ms
        .map_or(config.fast_latency, Duration::from_millis);
    let slow = parsed
        .slow_latency_ms
        .map_or(config.slow_latency, Duration::from_millis);
    config = config.with_latencies(fast, slow);
    if let Some(capacity) = parsed.queue_capacity {
        config = config.with_queue_capacity(capacity);
    }
    config.with_max_in_flight(parsed.max_in_flight)
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}
