//! crates/checksums/src/fast.rs
//!
//! The fast primitive: a salted CRC-32 rendered as decimal text.

use std::fmt;
use std::time::Duration;

use flate2::Crc;

use crate::HashError;
use crate::latency::{DEFAULT_FAST_LATENCY, simulate};

/// A cheap, freely parallel hash primitive.
///
/// Implementations must be safe to call from any number of threads at once
/// without external synchronisation.
pub trait FastHasher: Send + Sync {
    /// Hashes `data` and returns the textual digest.
    fn fast_hash(&self, data: &[u8]) -> Result<String, HashError>;
}

/// CRC-32 (IEEE polynomial) over `data ++ salt`, rendered in base 10.
///
/// # Examples
///
/// ```
/// use checksums::{Crc32Hasher, FastHasher};
/// use std::time::Duration;
///
/// let hasher = Crc32Hasher::new("", Duration::ZERO);
/// assert_eq!(hasher.fast_hash(b"0").unwrap(), "4108050209");
/// ```
#[derive(Clone)]
pub struct Crc32Hasher {
    salt: Box<[u8]>,
    latency: Duration,
}

impl Crc32Hasher {
    /// Creates a hasher with the given salt and simulated per-call latency.
    #[must_use]
    pub fn new(salt: impl AsRef<[u8]>, latency: Duration) -> Self {
        Self {
            salt: salt.as_ref().into(),
            latency,
        }
    }

    /// Returns the configured per-call latency.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    /// Computes the raw checksum without simulating latency.
    #[must_use]
    pub fn checksum(&self, data: &[u8]) -> u32 {
        let mut crc = Crc::new();
        crc.update(data);
        crc.update(&self.salt);
        crc.sum()
    }
}

impl Default for Crc32Hasher {
    fn default() -> Self {
        Self::new(crate::DEFAULT_SALT, DEFAULT_FAST_LATENCY)
    }
}

impl fmt::Debug for Crc32Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crc32Hasher")
            .field("salt_len", &self.salt.len())
            .field("latency", &self.latency)
            .finish()
    }
}

impl FastHasher for Crc32Hasher {
    fn fast_hash(&self, data: &[u8]) -> Result<String, HashError> {
        let digest = self.checksum(data).to_string();
        simulate(self.latency);
        tracing::trace!(target: "signer::hash", primitive = "crc32", %digest);
        Ok(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> Crc32Hasher {
        Crc32Hasher::new("", Duration::ZERO)
    }

    #[test]
    fn matches_ieee_check_value() {
        // Standard CRC-32/ISO-HDLC check value.
        assert_eq!(instant().checksum(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn renders_decimal_without_padding() {
        assert_eq!(instant().fast_hash(b"0").unwrap(), "4108050209");
        assert_eq!(instant().fast_hash(b"").unwrap(), "0");
    }

    #[test]
    fn salt_is_appended_to_input() {
        let salted = Crc32Hasher::new("pepper", Duration::ZERO);
        assert_eq!(salted.checksum(b"0"), instant().checksum(b"0pepper"));
        assert_ne!(salted.checksum(b"0"), instant().checksum(b"0"));
    }

    #[test]
    fn default_uses_reference_latency() {
        assert_eq!(Crc32Hasher::default().latency(), DEFAULT_FAST_LATENCY);
    }

    #[test]
    fn debug_hides_salt_bytes() {
        let rendered = format!("{:?}", Crc32Hasher::new("secret", Duration::ZERO));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("salt_len: 6"));
    }
}
