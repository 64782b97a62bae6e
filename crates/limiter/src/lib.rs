#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod limiter;

pub use crate::limiter::{LimiterError, LimiterStats, Permit, RateLimiter, shared};
