//! Node client port.
//!
//! The node client is the single shared connection to the Lightning node.
//! It hands out streams; it never interprets them. The channel acceptor is a
//! duplex exchange, so it is split into a request stream and a decision sink
//! that can be driven from different halves of one task.

use async_trait::async_trait;

use crate::domain::{ChannelOpenDecision, ChannelOpenRequest, FeedEvent, FeedKind};
use crate::error::Result;

/// Inbound half of the channel acceptor exchange.
#[async_trait]
pub trait ChannelRequestStream: Send {
    /// Next channel-open request.
    ///
    /// Returns `None` once the node closes the stream and `Some(Err(_))` on
    /// a transport failure.
    async fn next_request(&mut self) -> Option<Result<ChannelOpenRequest>>;
}

/// Outbound half of the channel acceptor exchange.
#[async_trait]
pub trait ChannelDecisionSink: Send {
    /// Send one decision back to the node.
    async fn send_decision(&mut self, decision: &ChannelOpenDecision) -> Result<()>;
}

/// Both halves of an open channel acceptor stream.
pub struct AcceptorChannel {
    pub requests: Box<dyn ChannelRequestStream>,
    pub decisions: Box<dyn ChannelDecisionSink>,
}

impl AcceptorChannel {
    pub fn new(
        requests: impl ChannelRequestStream + 'static,
        decisions: impl ChannelDecisionSink + 'static,
    ) -> Self {
        Self {
            requests: Box::new(requests),
            decisions: Box::new(decisions),
        }
    }
}

/// A read-only event feed.
#[async_trait]
pub trait EventFeed: Send {
    /// Next event; `None` once the feed ends.
    async fn next_event(&mut self) -> Option<Result<FeedEvent>>;
}

/// Shared connection to the Lightning node.
///
/// Implementations must tolerate concurrent use from several units.
/// `disconnect` is called exactly once, by the supervisor, after every
/// unit has stopped.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Open the bidirectional channel acceptor stream.
    async fn open_channel_acceptor(&self) -> Result<AcceptorChannel>;

    /// Subscribe to a read-only event feed.
    async fn subscribe(&self, feed: FeedKind) -> Result<Box<dyn EventFeed>>;

    /// Release the connection.
    async fn disconnect(&self);

    /// Short name for logging.
    fn node_name(&self) -> &str;
}
