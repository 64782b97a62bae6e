#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
mod fast;
mod latency;
mod slow;
mod stand_in;

pub use crate::error::HashError;
pub use crate::fast::{Crc32Hasher, FastHasher};
pub use crate::latency::{DEFAULT_FAST_LATENCY, DEFAULT_SLOW_LATENCY};
pub use crate::slow::{Md5Hasher, SlowHasher};
pub use crate::stand_in::FnHasher;

/// Salt appended to every input when no explicit salt is configured.
pub const DEFAULT_SALT: &str = "";
