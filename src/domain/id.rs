//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Correlation token for one channel-open negotiation.
///
/// Opaque bytes chosen by the funding peer. LND uses 32 bytes, but nothing
/// here depends on the length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingChanId(Vec<u8>);

impl PendingChanId {
    /// Create a new `PendingChanId` from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Get the raw token bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for PendingChanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl From<Vec<u8>> for PendingChanId {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for PendingChanId {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

/// Public key of a remote node, kept as lowercase hex.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerPubkey(String);

impl PeerPubkey {
    /// Create a new `PeerPubkey` from a hex string.
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into().to_ascii_lowercase())
    }

    /// Create a `PeerPubkey` from the serialized key bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Get the public key as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeerPubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PeerPubkey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for PeerPubkey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_chan_id_displays_as_hex() {
        let id = PendingChanId::new(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(id.to_string(), "deadbeef");
        assert_eq!(id.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn peer_pubkey_is_normalized_to_lowercase() {
        let key = PeerPubkey::new("02ABCDEF");
        assert_eq!(key.as_str(), "02abcdef");
        assert_eq!(key, PeerPubkey::from_bytes(&[0x02, 0xab, 0xcd, 0xef]));
    }
}
