//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`ChannelOpenRequest`] and
//! [`SizePolicy`] so tests focus on assertions rather than construction
//! boilerplate.

use crate::domain::{ChannelOpenRequest, PeerPubkey, PendingChanId, SizeBounds, SizePolicy};

/// A 32-byte pending channel id filled with `seed`.
pub fn pending_id(seed: u8) -> PendingChanId {
    PendingChanId::new(vec![seed; 32])
}

/// A compressed-key-shaped pubkey filled with `seed`.
pub fn pubkey(seed: u8) -> PeerPubkey {
    let mut bytes = vec![seed; 33];
    bytes[0] = 0x02;
    PeerPubkey::from_bytes(&bytes)
}

/// A request from peer `pubkey(peer)` with id `pending_id(seed)`.
pub fn open_request(seed: u8, peer: u8, funding_amt: u64) -> ChannelOpenRequest {
    ChannelOpenRequest {
        pending_chan_id: pending_id(seed),
        peer_pubkey: pubkey(peer),
        funding_amt,
        push_amt: 0,
    }
}

/// Private (0, 2_000_000), public (4_000_000, 16_777_215).
pub fn split_policy() -> SizePolicy {
    SizePolicy::new(
        SizeBounds::new(0, 2_000_000),
        SizeBounds::new(4_000_000, 16_777_215),
    )
}
