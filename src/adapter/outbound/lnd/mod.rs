//! LND adapter over the REST gateway.
//!
//! - [`client`] - [`LndClient`] implementing [`NodeClient`](crate::port::NodeClient)
//! - [`classifier`] - [`GraphClassifier`] implementing
//!   [`PeerClassifier`](crate::port::PeerClassifier)
//! - `dto` - gateway JSON envelopes
//! - `stream` - WebSocket stream halves
//! - `tls` - certificate pinning for LND's self-signed certificate

pub mod classifier;
pub mod client;
mod dto;
mod stream;
mod tls;

pub use classifier::GraphClassifier;
pub use client::{LndClient, LndConnection};
