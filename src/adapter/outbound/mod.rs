//! Outbound adapters (driven side).

pub mod lnd;
