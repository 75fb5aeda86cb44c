//! Node-agnostic domain types.

mod channel;
mod feed;
mod id;
mod policy;

pub use channel::{ChannelOpenDecision, ChannelOpenRequest};
pub use feed::{FeedEvent, FeedKind};
pub use id::{PeerPubkey, PendingChanId};
pub use policy::{
    PeerClass, SizeBounds, SizePolicy, Verdict, DEFAULT_MAX_CHANNEL_SIZE, DEFAULT_MIN_CHANNEL_SIZE,
};
