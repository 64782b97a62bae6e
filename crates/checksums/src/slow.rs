//! crates/checksums/src/slow.rs
//!
//! The slow primitive: a salted MD5 rendered as lowercase hex.

use std::fmt;
use std::time::Duration;

use digest::Digest;

use crate::HashError;
use crate::latency::{DEFAULT_SLOW_LATENCY, simulate};

/// An expensive hash primitive backed by a scarce shared resource.
///
/// Implementations do not synchronise themselves. Callers must hold a permit
/// from the process-wide limiter for the whole call.
pub trait SlowHasher: Send + Sync {
    /// Hashes `data` and returns the textual digest.
    fn slow_hash(&self, data: &[u8]) -> Result<String, HashError>;
}

/// MD5 over `data ++ salt`, rendered as 32 lowercase hex characters.
///
/// # Examples
///
/// ```
/// use checksums::{Md5Hasher, SlowHasher};
/// use std::time::Duration;
///
/// let hasher = Md5Hasher::new("", Duration::ZERO);
/// assert_eq!(
///     hasher.slow_hash(b"0").unwrap(),
///     "cfcd208495d565ef66e7dff9f98764da"
/// );
/// ```
#[derive(Clone)]
pub struct Md5Hasher {
    salt: Box<[u8]>,
    latency: Duration,
}

impl Md5Hasher {
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

    /// Computes the raw digest without simulating latency.
    #[must_use]
    pub fn digest(&self, data: &[u8]) -> [u8; 16] {
        let mut hasher = md5::Md5::new();
        hasher.update(data);
        hasher.update(&self.salt);
        hasher.finalize().into()
    }
}

impl Default for Md5Hasher {
    fn default() -> Self {
        Self::new(crate::DEFAULT_SALT, DEFAULT_SLOW_LATENCY)
    }
}

impl fmt::Debug for Md5Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Md5Hasher")
            .field("salt_len", &self.salt.len())
            .field("latency", &self.latency)
            .finish()
    }
}

impl SlowHasher for Md5Hasher {
    fn slow_hash(&self, data: &[u8]) -> Result<String, HashError> {
        let digest = to_hex(&self.digest(data));
        simulate(self.latency);
        tracing::trace!(target: "signer::hash", primitive = "md5", %digest);
        Ok(digest)
    }
}

fn to_hex(bytes: &[u8]) -> String {
    use fmt::Write as _;

    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}
