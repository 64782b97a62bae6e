//! crates/logging/src/tracing_bridge.rs
//! Subscriber installation driven by [`VerbosityConfig`].
//!
//! Each [`LogFlag`] level becomes a per-target directive on a
//! [`Targets`] filter in front of a stderr `fmt` layer:
//!
//! | level | tracing level |
//! |-------|---------------|
//! | 0     | WARN          |
//! | 1     | INFO          |
//! | 2     | DEBUG         |
//! | 3+    | TRACE         |

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use super::config::VerbosityConfig;
use super::levels::LogFlag;

const fn level_filter(level: u8) -> LevelFilter {
    match level {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

impl VerbosityConfig {
    /// Builds a per-target filter. Targets outside the signer namespace are
    /// held at WARN.
    pub fn targets(&self) -> Targets {
        LogFlag::ALL.into_iter().fold(
            Targets::new().with_default(LevelFilter::WARN),
            |targets, flag| targets.with_target(flag.target(), level_filter(self.levels.get(flag))),
        )
    }
}

/// Installs the global subscriber for `config`.
///
/// Returns `false` when a global subscriber was already installed, which
/// leaves the existing one in place.
///
/// # Example
///
/// ```rust,ignore
/// use logging::{VerbosityConfig, init_tracing};
///
/// init_tracing(&VerbosityConfig::from_verbose_level(2));
/// tracing::debug!(target: "signer::stage", seed = 0, "single hash done");
/// ```
pub fn init_tracing(config: &VerbosityConfig) -> bool {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_filter(config.targets());

    tracing_subscriber::registry().with(layer).try_init().is_ok()
}

/// Like [`init_tracing`], but a `RUST_LOG` directive in the environment
/// replaces the flag-derived filter entirely.
pub fn init_tracing_from_env(config: &VerbosityConfig) -> bool {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => {
            let layer = fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init().is_ok()
        }
        Err(_) => init_tracing(config),
    }
}
