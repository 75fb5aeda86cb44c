//! Periodic liveness log line.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::time::{interval_at, MissedTickBehavior};
use tracing::info;

use crate::error::Result;
use crate::runtime::{ServiceUnit, Shutdown};

/// Default interval between heartbeats.
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(600);

pub struct Heartbeat {
    interval: Duration,
}

impl Heartbeat {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

#[async_trait]
impl ServiceUnit for Heartbeat {
    fn name(&self) -> &'static str {
        "heartbeat"
    }

    async fn run(self: Box<Self>, mut shutdown: Shutdown) -> Result<()> {
        let started = Instant::now();
        let mut ticker = interval_at(tokio::time::Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    info!(uptime_secs = started.elapsed().as_secs(), "lndwarden is running");
                }
                () = shutdown.triggered() => return Ok(()),
            }
        }
    }
}
