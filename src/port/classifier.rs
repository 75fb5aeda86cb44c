//! Peer classification port.

use async_trait::async_trait;

use crate::domain::PeerPubkey;
use crate::error::Result;

/// Decides whether a peer is visible in the public channel graph.
#[async_trait]
pub trait PeerClassifier: Send + Sync {
    /// `true` when the peer is private (unknown to the graph or without
    /// public channels).
    async fn is_private(&self, pubkey: &PeerPubkey) -> Result<bool>;
}
