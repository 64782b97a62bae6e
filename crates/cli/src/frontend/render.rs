//! Output rendering for the front-end.

use std::fmt::Display;
use std::io::{self, Write};

use pipeline::{CombinedResult, HashComputationError, PipelineStats};

use super::arguments::{ArgumentError, PROGRAM_NAME};

pub(crate) fn combined<W: Write>(out: &mut W, combined: &CombinedResult) -> io::Result<()> {
    writeln!(out, "{}", combined.value)?;
    out.flush()
}

pub(crate) fn failures<W: Write>(out: &mut W, failures: &[HashComputationError]) -> io::Result<()> {
    for failure in failures {
        writeln!(out, "{PROGRAM_NAME}: {failure}")?;
    }
    if !failures.is_empty() {
        writeln!(out, "{PROGRAM_NAME}: {} seed(s) excluded from the combined result", failures.len())?;
    }
    Ok(())
}

pub(crate) fn stats<W: Write>(out: &mut W, stats: &PipelineStats) -> io::Result<()> {
    writeln!(out, "{PROGRAM_NAME}: {stats}")
}

pub(crate) fn usage_error<W: Write>(out: &mut W, error: &ArgumentError) -> io::Result<()> {
    match error {
        // clap renders its own prefix, usage line and hint.
        ArgumentError::Clap(error) => write!(out, "{error}"),
        ArgumentError::LogFlag(_) => error_line(out, error),
    }
}

pub(crate) fn fatal_error<W: Write>(out: &mut W, error: &impl Display) -> io::Result<()> {
    error_line(out, error)
}

fn error_line<W: Write>(out: &mut W, error: &impl Display) -> io::Result<()> {
    writeln!(out, "{PROGRAM_NAME}: error: {error}")
}
