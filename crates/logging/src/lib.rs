#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` turns the signer's `-v` count and `--log` flag tokens into
//! per-category verbosity levels and, with the `tracing` feature, installs a
//! `tracing-subscriber` registry that writes the selected events to stderr.
//!
//! # Categories
//!
//! Every library crate emits events under a `signer::` target. Each target
//! prefix belongs to one [`LogFlag`]:
//!
//! | flag      | target             | events                                   |
//! |-----------|--------------------|------------------------------------------|
//! | `stage`   | `signer::stage`    | per-seed SingleHash and MultiHash steps  |
//! | `hash`    | `signer::hash`     | individual primitive calls               |
//! | `limiter` | `signer::limiter`  | waits on the slow-hash admission gate    |
//! | `combine` | `signer::combine`  | the sink's sort-and-join                 |
//! | `runner`  | `signer::runner`   | worker start/stop, failures, statistics  |
//!
//! Levels run from 0 (warnings and errors only) to 3 (trace).
//!
//! # Examples
//!
//! ```
//! use logging::{LogFlag, VerbosityConfig};
//!
//! let mut config = VerbosityConfig::from_verbose_level(1);
//! config.apply_flag("hash3").unwrap();
//! assert_eq!(config.levels.get(LogFlag::Hash), 3);
//! assert_eq!(config.levels.get(LogFlag::Stage), 1);
//! ```

mod config;
mod levels;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{MAX_LEVEL, VerbosityConfig};
pub use levels::{FlagLevels, LogFlag};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{init_tracing, init_tracing_from_env};
