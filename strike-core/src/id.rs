use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::ops::Deref;

// AccountId identifies a participant or collaborator of the options engine:
// a holder, a pool, a fee recipient or a price calculator. It is a 32 byte
// long unique identifier, resembling a public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; 32]);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format as a hex string with a prefix of the first 6 bytes
        let prefix = hex::encode(&self.0[0..6]);
        write!(f, "acct:{}", prefix)
    }
}

impl Ord for AccountId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for AccountId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        AccountId([0; 32])
    }
}

impl Deref for AccountId {
    type Target = [u8; 32];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AccountId {
    pub fn new(uid: [u8; 32]) -> Self {
        AccountId(uid)
    }

    /// Create an AccountId from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        AccountId(bytes)
    }

    /// Get a reference to the internal bytes
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// The all-zero sentinel identity
    pub fn zero() -> Self {
        AccountId([0; 32])
    }

    /// Check whether this is the zero sentinel identity
    pub fn is_zero(&self) -> bool {
        self.0 == [0; 32]
    }

    /// Derive a deterministic AccountId from a set of seeds
    pub fn from_seeds(seeds: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();

        // Domain separator
        hasher.update(b"STRIKE_Account");

        // Add all seeds
        for seed in seeds {
            hasher.update(seed);
        }

        let hash = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        AccountId(bytes)
    }

    /// Derive a deterministic AccountId from a human-readable name.
    ///
    /// Convenience for tests and fixtures where identities only need to be
    /// distinct and reproducible.
    pub fn named(name: &str) -> Self {
        Self::from_seeds(&[name.as_bytes()])
    }

    /// Create a random AccountId for testing
    pub fn random() -> Self {
        // Generate a random ID using system time
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
            .to_le_bytes();

        Self::from_seeds(&[&now, &[1, 2, 3, 4]])
    }
}
