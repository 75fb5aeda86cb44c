//! Channel acceptance adapter.
//!
//! Bridges the node's duplex channel acceptor stream to the
//! [`ChannelPolicy`]. A reader pulls requests off the inbound half into a
//! bounded FIFO queue; an emitter takes them off the queue one at a time,
//! decides, and writes the decision to the outbound half. With one
//! producer and one consumer, decisions leave in the order requests
//! arrived.
//!
//! When the queue is full the reader stops pulling from the stream, so a
//! slow classifier pushes back on the node instead of growing memory.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::policy::ChannelPolicy;
use crate::domain::ChannelOpenRequest;
use crate::error::Result;
use crate::port::{AcceptorChannel, ChannelDecisionSink, ChannelRequestStream, NodeClient};
use crate::runtime::{ServiceUnit, Shutdown};

/// Default depth of the request queue.
pub const DEFAULT_QUEUE_DEPTH: usize = 64;

/// Answers every channel-open request the node forwards.
pub struct ChannelAcceptor {
    node: Arc<dyn NodeClient>,
    policy: ChannelPolicy,
    queue_depth: usize,
}

impl ChannelAcceptor {
    /// `queue_depth` is clamped to at least 1.
    pub fn new(node: Arc<dyn NodeClient>, policy: ChannelPolicy, queue_depth: usize) -> Self {
        Self {
            node,
            policy,
            queue_depth: queue_depth.max(1),
        }
    }

    /// Run the acceptor until shutdown, until the node closes the stream,
    /// or until a transport error.
    ///
    /// Shutdown returns `Ok(())`. A request still queued or being decided
    /// at that point gets no answer. When the node closes the inbound
    /// stream, every request already queued is decided before returning.
    pub async fn manage_channel_openings(&self, mut shutdown: Shutdown) -> Result<()> {
        if shutdown.is_triggered() {
            return Ok(());
        }

        tokio::select! {
            result = self.session() => result,
            () = shutdown.triggered() => {
                info!(target: "lndwarden::acceptor", "Channel acceptor stopped");
                Ok(())
            }
        }
    }

    async fn session(&self) -> Result<()> {
        let AcceptorChannel {
            mut requests,
            mut decisions,
        } = self.node.open_channel_acceptor().await?;

        info!(
            target: "lndwarden::acceptor",
            node = self.node.node_name(),
            private = ?self.policy.sizes().private,
            public = ?self.policy.sizes().public,
            queue_depth = self.queue_depth,
            "Channel acceptor started"
        );

        let (tx, rx) = mpsc::channel(self.queue_depth);

        tokio::try_join!(
            read_requests(requests.as_mut(), tx),
            emit_decisions(&self.policy, decisions.as_mut(), rx),
        )?;

        info!(target: "lndwarden::acceptor", "Channel acceptor stream closed by node");
        Ok(())
    }
}

#[async_trait]
impl ServiceUnit for ChannelAcceptor {
    fn name(&self) -> &'static str {
        "channel_acceptor"
    }

    async fn run(self: Box<Self>, shutdown: Shutdown) -> Result<()> {
        self.manage_channel_openings(shutdown).await
    }
}

/// Move requests from the stream into the queue. Dropping `tx` on return
/// lets the emitter drain and finish.
async fn read_requests(
    requests: &mut dyn ChannelRequestStream,
    tx: mpsc::Sender<ChannelOpenRequest>,
) -> Result<()> {
    while let Some(next) = requests.next_request().await {
        let request = next?;
        info!(
            target: "lndwarden::acceptor",
            pending_chan_id = %request.pending_chan_id,
            peer = %request.peer_pubkey,
            funding_amt = request.funding_amt,
            push_amt = request.push_amt,
            "Channel open requested"
        );
        if tx.send(request).await.is_err() {
            break;
        }
    }
    Ok(())
}

async fn emit_decisions(
    policy: &ChannelPolicy,
    decisions: &mut dyn ChannelDecisionSink,
    mut rx: mpsc::Receiver<ChannelOpenRequest>,
) -> Result<()> {
    while let Some(request) = rx.recv().await {
        let decision = policy.decide(&request).await;
        decisions.send_decision(&decision).await?;
        info!(
            target: "lndwarden::acceptor",
            pending_chan_id = %decision.pending_chan_id,
            peer = %request.peer_pubkey,
            funding_amt = request.funding_amt,
            accept = decision.accept,
            "Channel decision sent"
        );
    }
    debug!(target: "lndwarden::acceptor", "Request queue drained");
    Ok(())
}
