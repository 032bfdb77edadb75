//! Content Hash Value Object
//!
//! Fingerprint of a rendered build graph. Regenerating an unchanged graph must
//! leave `build.ninja` untouched, otherwise Ninja sees a new manifest and
//! re-plans every edge.

use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 hash with a `sha256:` prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub const PREFIX: &'static str = "sha256:";

    /// Hash raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(format!("{}{:x}", Self::PREFIX, Sha256::digest(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Just the hex digest
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
