use std::ffi::OsString;
use std::num::NonZeroUsize;

use thiserror::Error;

use super::command_builder::clap_command;

pub(crate) const PROGRAM_NAME: &str = "signer";

/// Seeds signed when the command line names none.
pub(crate) const DEMO_SEEDS: [u64; 2] = [0, 1];

#[derive(Debug, Error)]
pub(crate) enum ArgumentError {
    #[error(transparent)]
    Clap(#[from] clap::Error),
    #[error("invalid --log value: {0}")]
    LogFlag(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ParsedArgs {
    pub(crate) seeds: Vec<u64>,
    pub(crate) salt: Option<String>,
    pub(crate) fast_latency_ms: Option<u64>,
    pub(crate) slow_latency_ms: Option<u64>,
    pub(crate) queue_capacity: Option<usize>,
    pub(crate) max_in_flight: Option<NonZeroUsize>,
    pub(crate) show_stats: bool,
    pub(crate) verbosity: u8,
    pub(crate) log_flags: Vec<String>,
}

pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, ArgumentError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command(PROGRAM_NAME).try_get_matches_from(args)?;

    let mut seeds: Vec<u64> = matches
        .remove_many::<u64>("seeds")
        .map(Iterator::collect)
        .unwrap_or_default();
    let count = matches.remove_one::<u64>("count");
    if let Some(count) = count {
        seeds.extend(0..count);
    }
    if seeds.is_empty() && count.is_none() {
        seeds.extend(DEMO_SEEDS);
    }

    let verbosity = matches.get_count("verbose");
    let log_flags: Vec<String> = matches
        .remove_many::<String>("log")
        .map(Iterator::collect)
        .unwrap_or_default();

    Ok(ParsedArgs {
        seeds,
        salt: matches.remove_one::<String>("salt"),
        fast_latency_ms: matches.remove_one::<u64>("fast-latency-ms"),
        slow_latency_ms: matches.remove_one::<u64>("slow-latency-ms"),
        queue_capacity: matches.remove_one::<usize>("queue-capacity"),
        max_in_flight: matches.remove_one::<NonZeroUsize>("max-in-flight"),
        show_stats: matches.get_flag("stats"),
        verbosity,
        log_flags,
    })
}
