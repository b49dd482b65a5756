//! Stored credential types.

use serde::{Deserialize, Serialize};

/// A password hash in PHC string format, as written to the credential store.
///
/// The core never hashes or verifies passwords itself; this type only keeps
/// hashes from being mixed up with plaintext strings. `Debug` is redacted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredPasswordHash(String);

impl StoredPasswordHash {
    /// Wrap an encoded hash.
    #[must_use]
    pub const fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Get the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for StoredPasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StoredPasswordHash([REDACTED])")
    }
}

impl From<String> for StoredPasswordHash {
    fn from(hash: String) -> Self {
        Self(hash)
    }
}
