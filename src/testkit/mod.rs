//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`node`] - In-memory [`NodeClient`](crate::port::NodeClient) with
//!   scripted acceptor streams and feeds.
//! - [`classifier`] - Scripted [`PeerClassifier`](crate::port::PeerClassifier).
//! - [`signal`] - Channel-driven termination signals.
//! - [`unit`] - Service units with fixed behavior (idle, failing, stubborn).
//! - [`domain`] - Builders for requests, ids and policies.

pub mod classifier;
pub mod domain;
pub mod node;
pub mod signal;
pub mod unit;
