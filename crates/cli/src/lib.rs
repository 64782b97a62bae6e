#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command-line front-end for the signer pipeline. It parses the
//! seed list and tuning switches, installs the tracing subscriber, runs a
//! [`pipeline::Signer`] and renders the combined signature.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard output and error, so tests drive the full front-end without
//! spawning a process. A [`clap`](https://docs.rs/clap/) command definition
//! performs the parse; everything after that is plain configuration assembly.
//!
//! # Exit codes
//!
//! | code | meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | every seed combined                       |
//! | 1    | usage error                               |
//! | 2    | some seeds failed; partial output printed |
//! | 3    | fatal pipeline error                      |
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(
//!     ["signer", "--fast-latency-ms", "0", "--slow-latency-ms", "0", "0"],
//!     &mut stdout,
//!     &mut stderr,
//! );
//!
//! assert_eq!(exit_code, 0);
//! assert_eq!(
//!     String::from_utf8(stdout).unwrap(),
//!     "29568666068035183841425683795340791879727309630931025356555\n"
//! );
//! ```
//!
//! # See also
//!
//! - `src/bin/signer.rs` for the binary that wires [`run`] into `main`.

mod frontend;

pub use frontend::{EXIT_FATAL, EXIT_OK, EXIT_PARTIAL, EXIT_USAGE, exit_code_from, run};
