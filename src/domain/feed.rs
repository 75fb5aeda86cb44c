//! Read-only node event feeds.

use std::fmt;

/// Which node feed a monitor drains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    /// Channel graph topology updates.
    GraphTopology,
    /// HTLC forwarding, settlement and failure events.
    HtlcEvents,
}

impl FeedKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GraphTopology => "graph_topology",
            Self::HtlcEvents => "htlc_events",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One event from a feed. The payload is logged as received.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEvent {
    pub kind: FeedKind,
    pub payload: serde_json::Value,
}

impl FeedEvent {
    #[must_use]
    pub fn new(kind: FeedKind, payload: serde_json::Value) -> Self {
        Self { kind, payload }
    }
}
