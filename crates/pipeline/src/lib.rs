#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod config;
mod context;
mod error;
mod hashers;
mod messages;
mod runner;
mod signer;
pub mod stage;
mod stats;

pub use crate::config::{
    DEFAULT_QUEUE_CAPACITY, MAX_QUEUE_CAPACITY, MIN_QUEUE_CAPACITY, PipelineConfig,
};
pub use crate::context::StageContext;
pub use crate::error::{HashComputationError, PipelineError};
pub use crate::hashers::{Hashers, StepError};
pub use crate::messages::{CombinedResult, MultiHashResult, SeedValue, SingleHashResult};
pub use crate::runner::{PipelineRunner, RunOutput};
pub use crate::signer::{PipelineReport, Signer, SignerBuilder};
pub use crate::stage::{CombineStage, MULTI_HASH_FAN_OUT, MultiHashStage, SingleHashStage, Stage};
pub use crate::stats::PipelineStats;
