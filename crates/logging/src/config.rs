//! crates/logging/src/config.rs
//! Verbosity configuration built from `-v` counts and `--log` tokens.

use super::levels::{FlagLevels, LogFlag};

/// Highest meaningful level; anything above behaves like trace.
pub const MAX_LEVEL: u8 = 3;

/// Per-category verbosity configuration.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Level per flag.
    pub levels: FlagLevels,
}

impl VerbosityConfig {
    /// Create a configuration from a `-v` count.
    ///
    /// - 0: warnings and errors only
    /// - 1: per-seed results and run summary
    /// - 2: per-step stage events, primitive calls and limiter waits
    /// - 3 and above: everything at trace level
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        match level {
            0 => {}
            1 => {
                config.levels.stage = 1;
                config.levels.combine = 1;
                config.levels.runner = 1;
            }
            2 => {
                config.levels.stage = 2;
                config.levels.combine = 2;
                config.levels.runner = 2;
                config.levels.hash = 1;
                config.levels.limiter = 1;
            }
            _ => config.levels.set_all(MAX_LEVEL),
        }

        config
    }

    /// Apply a comma-separated list of flag tokens (e.g. `"stage2,hash"`).
    pub fn apply_flags(&mut self, list: &str) -> Result<(), String> {
        list.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .try_for_each(|token| self.apply_flag(token))
    }

    /// Apply a single flag token (e.g. `"limiter2"`, `"all3"`, `"hash"`).
    ///
    /// Levels above [`MAX_LEVEL`] saturate to it, like extra `-v` flags.
    pub fn apply_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        if name == "all" {
            self.levels.set_all(level);
            return Ok(());
        }

        let flag = LogFlag::from_name(name).ok_or_else(|| format!("unknown log flag: {name}"))?;
        self.levels.set(flag, level);
        Ok(())
    }

    /// Returns the level configured for the flag owning `target`, or 0 for
    /// targets outside the signer namespace.
    pub fn level_for_target(&self, target: &str) -> u8 {
        LogFlag::from_target(target).map_or(0, |flag| self.levels.get(flag))
    }
}

fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    let digit_start = token.find(|c: char| c.is_ascii_digit());

    match digit_start {
        Some(0) => Err(format!("missing flag name in: {token}")),
        Some(pos) => {
            let name = &token[..pos];
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((name, level.min(MAX_LEVEL)))
        }
        None => Ok((token, 1)),
    }
}
