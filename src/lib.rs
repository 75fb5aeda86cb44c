//! lndwarden - A decision daemon for LND.
//!
//! Supervises long-lived consumers of a Lightning node's event streams. The
//! central one answers every inbound channel-open request with an accept or
//! reject, in arrival order, based on the proposed channel size and whether
//! the requesting peer is visible in the public channel graph.
//!
//! # Architecture
//!
//! - **`runtime::Supervisor`** - Runs every unit on one `JoinSet`, turns the
//!   first SIGINT/SIGTERM into a shared shutdown, aborts stragglers after a
//!   grace period and releases the node connection exactly once.
//! - **`application::ChannelAcceptor`** - Bounded FIFO relay between the
//!   node's channel acceptor stream and the [`application::ChannelPolicy`].
//! - **`application::FeedMonitor`** - Logs HTLC events or graph updates.
//! - **`adapter::outbound::lnd`** - LND REST gateway over HTTPS and WebSocket.
//!
//! # Modules
//!
//! - [`domain`] - Node-agnostic types: requests, decisions, size policy
//! - [`port`] - Traits for the node client and the peer classifier
//! - [`application`] - Units and the acceptance policy
//! - [`runtime`] - Shutdown signal, OS signals, supervisor
//! - [`infrastructure`] - Configuration and wiring
//! - [`adapter`] - CLI and LND adapters
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use lndwarden::domain::{PeerClass, SizeBounds, SizePolicy};
//!
//! let policy = SizePolicy::new(SizeBounds::new(0, 2_000_000), SizeBounds::default());
//! assert!(policy.evaluate(PeerClass::Private, 1_000_000).is_accept());
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
pub mod runtime;

/// Shared test utilities (enabled for tests or with the `testkit` feature).
#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
