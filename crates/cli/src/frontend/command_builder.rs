use std::num::NonZeroUsize;

use clap::{Arg, ArgAction, Command, value_parser};

/// Largest accepted `--count`; every seed is materialised before the run.
pub(crate) const MAX_SEED_COUNT: u64 = 1_000_000;

pub(crate) fn clap_command(program_name: &'static str) -> Command {
    Command::new(program_name)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compute the composite SingleHash/MultiHash signature of a set of seeds.")
        .arg(
            Arg::new("seeds")
                .value_name("SEED")
                .help("Seed integers to sign. Defaults to 0 1 when neither seeds nor --count are given.")
                .num_args(0..)
                .value_parser(value_parser!(u64))
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .short('n')
                .value_name("N")
                .help("Append seeds 0..N to the seed list (N at most 1000000).")
                .value_parser(value_parser!(u64).range(..=MAX_SEED_COUNT))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("salt")
                .long("salt")
                .value_name("SALT")
                .help("Salt appended to every primitive input.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("fast-latency-ms")
                .long("fast-latency-ms")
                .value_name("MS")
                .help("Simulated latency of each fast (CRC-32) call in milliseconds.")
                .value_parser(value_parser!(u64))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("slow-latency-ms")
                .long("slow-latency-ms")
                .value_name("MS")
                .help("Simulated latency of each slow (MD5) call in milliseconds.")
                .value_parser(value_parser!(u64))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("queue-capacity")
                .long("queue-capacity")
                .value_name("N")
                .help("Capacity of each queue between stages (clamped to 1..=4096).")
                .value_parser(value_parser!(usize))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("max-in-flight")
                .long("max-in-flight")
                .value_name("N")
                .help("Process at most N items at once in each stage.")
                .value_parser(value_parser!(NonZeroUsize))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .help("Print run statistics to standard error.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase verbosity; may be supplied multiple times.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .value_name("FLAGS")
                .help("Set per-category log levels, e.g. stage2,limiter or all3.")
                .action(ArgAction::Append),
        )
}
