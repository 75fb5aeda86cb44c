//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`NodeClient`], [`ChannelRequestStream`], [`ChannelDecisionSink`],
//!   [`EventFeed`] - Lightning node streams
//! - [`PeerClassifier`] - Graph visibility of a peer

mod classifier;
mod node;

pub use classifier::PeerClassifier;
pub use node::{AcceptorChannel, ChannelDecisionSink, ChannelRequestStream, EventFeed, NodeClient};
