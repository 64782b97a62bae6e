//! crates/logging/src/levels.rs
//! Flag enum and level structure for per-category verbosity.

/// Diagnostic categories, one per `signer::` tracing target prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogFlag {
    /// SingleHash and MultiHash stage steps.
    Stage,
    /// Individual primitive calls.
    Hash,
    /// Waits on the slow-hash admission gate.
    Limiter,
    /// Sink sort-and-join.
    Combine,
    /// Pipeline wiring, failures and statistics.
    Runner,
}

impl LogFlag {
    /// Every flag, in display order.
    pub const ALL: [Self; 5] = [
        Self::Stage,
        Self::Hash,
        Self::Limiter,
        Self::Combine,
        Self::Runner,
    ];

    /// Flag name as accepted by `--log`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stage => "stage",
            Self::Hash => "hash",
            Self::Limiter => "limiter",
            Self::Combine => "combine",
            Self::Runner => "runner",
        }
    }

    /// Tracing target prefix owned by this flag.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Stage => "signer::stage",
            Self::Hash => "signer::hash",
            Self::Limiter => "signer::limiter",
            Self::Combine => "signer::combine",
            Self::Runner => "signer::runner",
        }
    }

    /// Looks a flag up by its `--log` name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }

    /// Maps a tracing target to the flag owning it.
    ///
    /// Matches on the `::` separated segment so `signer::stage::multi_hash`
    /// resolves to [`LogFlag::Stage`] while unrelated targets resolve to
    /// nothing.
    #[must_use]
    pub fn from_target(target: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| {
            let prefix = flag.target();
            target == prefix
                || target
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with("::"))
        })
    }
}

/// Verbosity level per [`LogFlag`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlagLevels {
    /// Stage step level.
    pub stage: u8,
    /// Primitive call level.
    pub hash: u8,
    /// Admission gate level.
    pub limiter: u8,
    /// Sink level.
    pub combine: u8,
    /// Runner level.
    pub runner: u8,
}

impl FlagLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: LogFlag) -> u8 {
        match flag {
            LogFlag::Stage => self.stage,
            LogFlag::Hash => self.hash,
            LogFlag::Limiter => self.limiter,
            LogFlag::Combine => self.combine,
            LogFlag::Runner => self.runner,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: LogFlag, level: u8) {
        match flag {
            LogFlag::Stage => self.stage = level,
            LogFlag::Hash => self.hash = level,
            LogFlag::Limiter => self.limiter = level,
            LogFlag::Combine => self.combine = level,
            LogFlag::Runner => self.runner = level,
        }
    }

    /// Set every flag to `level`.
    pub fn set_all(&mut self, level: u8) {
        for flag in LogFlag::ALL {
            self.set(flag, level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_matches_exact_and_nested() {
        assert_eq!(LogFlag::from_target("signer::stage"), Some(LogFlag::Stage));
        assert_eq!(
            LogFlag::from_target("signer::stage::multi_hash"),
            Some(LogFlag::Stage)
        );
        assert_eq!(LogFlag::from_target("signer::hash"), Some(LogFlag::Hash));
    }

    #[test]
    fn target_rejects_partial_segments() {
        assert_eq!(LogFlag::from_target("signer::stagehand"), None);
        assert_eq!(LogFlag::from_target("hyper::client"), None);
    }

    #[test]
    fn names_round_trip() {
        for flag in LogFlag::ALL {
            assert_eq!(LogFlag::from_name(flag.name()), Some(flag));
        }
        assert_eq!(LogFlag::from_name("copy"), None);
    }

    #[test]
    fn set_all_updates_every_flag() {
        let mut levels = FlagLevels::default();
        levels.set_all(2);
        assert!(LogFlag::ALL.iter().all(|flag| levels.get(*flag) == 2));
    }
}
