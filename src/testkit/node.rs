//! In-memory [`NodeClient`] for testing.
//!
//! Streams are scripted ahead of time through control handles:
//!
//! - [`MockNode::acceptor`] prepares the next channel acceptor stream and
//!   returns an [`AcceptorHandle`] to push requests and read decisions.
//! - [`MockNode::feed`] prepares an event feed and returns a [`FeedHandle`].
//!
//! Opening a stream that was not prepared fails with a connection error.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::domain::{ChannelOpenDecision, ChannelOpenRequest, FeedEvent, FeedKind};
use crate::error::{Error, Result};
use crate::port::{AcceptorChannel, ChannelDecisionSink, ChannelRequestStream, EventFeed, NodeClient};

/// Test double owning the shared mock client.
pub struct MockNode {
    client: Arc<MockNodeClient>,
}

struct MockNodeClient {
    acceptor: Mutex<Option<AcceptorChannel>>,
    feeds: Mutex<HashMap<FeedKind, Box<dyn EventFeed>>>,
    acceptor_opens: AtomicU32,
    disconnects: AtomicU32,
}

impl MockNode {
    pub fn new() -> Self {
        Self {
            client: Arc::new(MockNodeClient {
                acceptor: Mutex::new(None),
                feeds: Mutex::new(HashMap::new()),
                acceptor_opens: AtomicU32::new(0),
                disconnects: AtomicU32::new(0),
            }),
        }
    }

    /// The client to hand to units and the supervisor.
    pub fn client(&self) -> Arc<dyn NodeClient> {
        self.client.clone()
    }

    /// Prepare the channel acceptor stream returned by the next open.
    pub fn acceptor(&self, buffer: usize) -> AcceptorHandle {
        let (request_tx, request_rx) = mpsc::channel(buffer);
        let (decision_tx, decision_rx) = mpsc::unbounded_channel();
        *self.client.acceptor.lock() = Some(AcceptorChannel::new(
            MockRequestStream { rx: request_rx },
            MockDecisionSink { tx: decision_tx },
        ));
        AcceptorHandle {
            request_tx,
            decision_rx,
        }
    }

    /// Prepare the feed returned by the next subscription to `kind`.
    pub fn feed(&self, kind: FeedKind, buffer: usize) -> FeedHandle {
        let (tx, rx) = mpsc::channel(buffer);
        self.client
            .feeds
            .lock()
            .insert(kind, Box::new(MockFeed { rx }));
        FeedHandle { kind, tx }
    }

    /// How many times `disconnect()` was called.
    pub fn disconnect_count(&self) -> u32 {
        self.client.disconnects.load(Ordering::SeqCst)
    }

    /// How many times the channel acceptor was opened.
    pub fn acceptor_open_count(&self) -> u32 {
        self.client.acceptor_opens.load(Ordering::SeqCst)
    }
}

impl Default for MockNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodeClient for MockNodeClient {
    async fn open_channel_acceptor(&self) -> Result<AcceptorChannel> {
        self.acceptor_opens.fetch_add(1, Ordering::SeqCst);
        self.acceptor
            .lock()
            .take()
            .ok_or_else(|| Error::Connection("no acceptor stream scripted".into()))
    }

    async fn subscribe(&self, feed: FeedKind) -> Result<Box<dyn EventFeed>> {
        self.feeds
            .lock()
            .remove(&feed)
            .ok_or_else(|| Error::Connection(format!("no {feed} feed scripted")))
    }

    async fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
    }

    fn node_name(&self) -> &str {
        "mock"
    }
}

/// Control handle for a scripted channel acceptor stream.
pub struct AcceptorHandle {
    request_tx: mpsc::Sender<Result<ChannelOpenRequest>>,
    decision_rx: mpsc::UnboundedReceiver<ChannelOpenDecision>,
}

impl AcceptorHandle {
    /// Deliver a request to the acceptor.
    pub async fn send(&self, request: ChannelOpenRequest) {
        let _ = self.request_tx.send(Ok(request)).await;
    }

    /// Deliver a transport error to the acceptor.
    pub async fn fail(&self, error: Error) {
        let _ = self.request_tx.send(Err(error)).await;
    }

    /// Get a cloned sender for delivering requests from another task.
    pub fn sender(&self) -> mpsc::Sender<Result<ChannelOpenRequest>> {
        self.request_tx.clone()
    }

    /// Close the inbound stream and keep reading decisions.
    pub fn close(self) -> DecisionReader {
        DecisionReader {
            decision_rx: self.decision_rx,
        }
    }

    /// Next decision sent back by the acceptor.
    pub async fn next_decision(&mut self) -> Option<ChannelOpenDecision> {
        self.decision_rx.recv().await
    }

    /// Decision already sent, without waiting.
    pub fn try_decision(&mut self) -> Option<ChannelOpenDecision> {
        self.decision_rx.try_recv().ok()
    }
}

/// Outbound half left after [`AcceptorHandle::close`].
pub struct DecisionReader {
    decision_rx: mpsc::UnboundedReceiver<ChannelOpenDecision>,
}

impl DecisionReader {
    pub async fn next_decision(&mut self) -> Option<ChannelOpenDecision> {
        self.decision_rx.recv().await
    }

    /// Every remaining decision; returns once the acceptor dropped its sink.
    pub async fn collect(mut self) -> Vec<ChannelOpenDecision> {
        let mut out = Vec::new();
        while let Some(decision) = self.decision_rx.recv().await {
            out.push(decision);
        }
        out
    }
}

struct MockRequestStream {
    rx: mpsc::Receiver<Result<ChannelOpenRequest>>,
}

#[async_trait]
impl ChannelRequestStream for MockRequestStream {
    async fn next_request(&mut self) -> Option<Result<ChannelOpenRequest>> {
        self.rx.recv().await
    }
}

struct MockDecisionSink {
    tx: mpsc::UnboundedSender<ChannelOpenDecision>,
}

#[async_trait]
impl ChannelDecisionSink for MockDecisionSink {
    async fn send_decision(&mut self, decision: &ChannelOpenDecision) -> Result<()> {
        self.tx
            .send(decision.clone())
            .map_err(|_| Error::Connection("decision receiver dropped".into()))
    }
}

/// Control handle for a scripted event feed.
pub struct FeedHandle {
    kind: FeedKind,
    tx: mpsc::Sender<Result<FeedEvent>>,
}

impl FeedHandle {
    /// Deliver one event with the given payload.
    pub async fn send(&self, payload: serde_json::Value) {
        let _ = self.tx.send(Ok(FeedEvent::new(self.kind, payload))).await;
    }

    /// Deliver a transport error.
    pub async fn fail(&self, error: Error) {
        let _ = self.tx.send(Err(error)).await;
    }

    /// End the feed.
    pub fn close(self) {}
}

struct MockFeed {
    rx: mpsc::Receiver<Result<FeedEvent>>,
}

#[async_trait]
impl EventFeed for MockFeed {
    async fn next_event(&mut self) -> Option<Result<FeedEvent>> {
        self.rx.recv().await
    }
}
