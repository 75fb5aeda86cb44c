//! Channel-open negotiation messages.

use super::id::{PendingChanId, PeerPubkey};

/// A remote peer's request to open a channel to us.
///
/// Produced by the node's channel acceptor stream and consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOpenRequest {
    /// Correlation token the answer must carry.
    pub pending_chan_id: PendingChanId,
    /// Node requesting the channel.
    pub peer_pubkey: PeerPubkey,
    /// Proposed channel capacity in satoshis.
    pub funding_amt: u64,
    /// Amount pushed to our side on open, in millisatoshis.
    pub push_amt: u64,
}

/// Our answer to a [`ChannelOpenRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOpenDecision {
    pub pending_chan_id: PendingChanId,
    pub accept: bool,
}

impl ChannelOpenDecision {
    /// Accept the request identified by `pending_chan_id`.
    #[must_use]
    pub fn accept(pending_chan_id: PendingChanId) -> Self {
        Self {
            pending_chan_id,
            accept: true,
        }
    }

    /// Reject the request identified by `pending_chan_id`.
    #[must_use]
    pub fn reject(pending_chan_id: PendingChanId) -> Self {
        Self {
            pending_chan_id,
            accept: false,
        }
    }
}
