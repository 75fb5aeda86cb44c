//! Application services (use cases).
//!
//! The units the supervisor runs, and the policy the channel acceptor
//! consults.

pub mod acceptor;
pub mod heartbeat;
pub mod monitor;
pub mod policy;

pub use acceptor::{ChannelAcceptor, DEFAULT_QUEUE_DEPTH};
pub use heartbeat::{Heartbeat, DEFAULT_HEARTBEAT_INTERVAL};
pub use monitor::FeedMonitor;
pub use policy::{ChannelPolicy, DEFAULT_CLASSIFY_TIMEOUT};
