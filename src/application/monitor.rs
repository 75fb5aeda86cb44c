//! Passive feed monitors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::FeedKind;
use crate::error::Result;
use crate::port::NodeClient;
use crate::runtime::{ServiceUnit, Shutdown};

/// Drains one read-only node feed into the log.
pub struct FeedMonitor {
    node: Arc<dyn NodeClient>,
    kind: FeedKind,
}

impl FeedMonitor {
    pub fn new(node: Arc<dyn NodeClient>, kind: FeedKind) -> Self {
        Self { node, kind }
    }

    pub fn htlc_events(node: Arc<dyn NodeClient>) -> Self {
        Self::new(node, FeedKind::HtlcEvents)
    }

    pub fn graph_updates(node: Arc<dyn NodeClient>) -> Self {
        Self::new(node, FeedKind::GraphTopology)
    }

    #[must_use]
    pub const fn kind(&self) -> FeedKind {
        self.kind
    }

    async fn drain(&self) -> Result<()> {
        let mut feed = self.node.subscribe(self.kind).await?;
        info!(target: "lndwarden::monitor", feed = %self.kind, "Subscribed");

        let mut count: u64 = 0;
        while let Some(event) = feed.next_event().await {
            let event = event?;
            count += 1;
            info!(
                target: "lndwarden::monitor",
                feed = %event.kind,
                event = %event.payload,
                "Feed event"
            );
        }

        info!(target: "lndwarden::monitor", feed = %self.kind, events = count, "Feed ended");
        Ok(())
    }
}

#[async_trait]
impl ServiceUnit for FeedMonitor {
    fn name(&self) -> &'static str {
        match self.kind {
            FeedKind::HtlcEvents => "htlc_monitor",
            FeedKind::GraphTopology => "graph_monitor",
        }
    }

    async fn run(self: Box<Self>, mut shutdown: Shutdown) -> Result<()> {
        tokio::select! {
            result = self.drain() => result,
            () = shutdown.triggered() => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::error::Error;
    use crate::runtime::shutdown_channel;
    use crate::testkit::node::MockNode;

    #[tokio::test]
    async fn feed_end_is_a_normal_exit() {
        let node = MockNode::new();
        let feed = node.feed(FeedKind::HtlcEvents, 4);
        feed.send(json!({"event_type": "FORWARD"})).await;
        feed.send(json!({"event_type": "SEND"})).await;
        feed.close();

        let monitor = Box::new(FeedMonitor::htlc_events(node.client()));
        let (_trigger, shutdown) = shutdown_channel();

        assert_eq!(monitor.name(), "htlc_monitor");
        assert_eq!(monitor.kind(), FeedKind::HtlcEvents);
        assert!(monitor.run(shutdown).await.is_ok());
    }

    #[tokio::test]
    async fn shutdown_stops_an_idle_feed() {
        let node = MockNode::new();
        let _feed = node.feed(FeedKind::GraphTopology, 4);
        let monitor = Box::new(FeedMonitor::graph_updates(node.client()));
        assert_eq!(monitor.kind(), FeedKind::GraphTopology);
        let (trigger, shutdown) = shutdown_channel();

        let task = tokio::spawn(monitor.run(shutdown));
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.trigger();

        let result = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("monitor should stop on shutdown")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn feed_error_fails_the_unit() {
        let node = MockNode::new();
        let feed = node.feed(FeedKind::HtlcEvents, 4);
        feed.fail(Error::Protocol("permission denied".into())).await;

        let monitor = Box::new(FeedMonitor::htlc_events(node.client()));
        let (_trigger, shutdown) = shutdown_channel();

        let err = monitor.run(shutdown).await.unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }
}
