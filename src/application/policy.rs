//! Channel acceptance policy.
//!
//! Combines the pure [`SizePolicy`] with a [`PeerClassifier`] to turn a
//! [`ChannelOpenRequest`] into a [`ChannelOpenDecision`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::{ChannelOpenDecision, ChannelOpenRequest, PeerClass, SizePolicy, Verdict};
use crate::error::{Error, Result};
use crate::port::PeerClassifier;

/// Default deadline for one peer classification.
pub const DEFAULT_CLASSIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Size thresholds plus the classifier that picks which pair applies.
#[derive(Clone)]
pub struct ChannelPolicy {
    sizes: SizePolicy,
    classifier: Arc<dyn PeerClassifier>,
    classify_timeout: Duration,
}

impl ChannelPolicy {
    pub fn new(sizes: SizePolicy, classifier: Arc<dyn PeerClassifier>) -> Self {
        Self {
            sizes,
            classifier,
            classify_timeout: DEFAULT_CLASSIFY_TIMEOUT,
        }
    }

    /// Classifications slower than `timeout` fail, so the request is rejected.
    #[must_use]
    pub fn with_classify_timeout(mut self, timeout: Duration) -> Self {
        self.classify_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn sizes(&self) -> &SizePolicy {
        &self.sizes
    }

    /// Classify the peer and evaluate the funding amount.
    ///
    /// Only the peer class and `funding_amt` are considered.
    pub async fn evaluate(&self, request: &ChannelOpenRequest) -> Result<(PeerClass, Verdict)> {
        let lookup = self.classifier.is_private(&request.peer_pubkey);
        let is_private = tokio::time::timeout(self.classify_timeout, lookup)
            .await
            .map_err(|_| Error::Classification {
                pubkey: request.peer_pubkey.to_string(),
                reason: format!("timed out after {:?}", self.classify_timeout),
            })??;
        let class = PeerClass::from_is_private(is_private);
        let verdict = self.sizes.evaluate(class, request.funding_amt);

        info!(
            target: "lndwarden::acceptor",
            pending_chan_id = %request.pending_chan_id,
            peer = %request.peer_pubkey,
            class = %class,
            funding_amt = request.funding_amt,
            verdict = %verdict,
            "Channel request evaluated"
        );

        Ok((class, verdict))
    }

    /// Whether the request should be accepted.
    pub async fn accept_channel(&self, request: &ChannelOpenRequest) -> Result<bool> {
        let (_, verdict) = self.evaluate(request).await?;
        Ok(verdict.is_accept())
    }

    /// Decide a request. Never fails: a classification error rejects.
    pub async fn decide(&self, request: &ChannelOpenRequest) -> ChannelOpenDecision {
        let id = request.pending_chan_id.clone();
        match self.accept_channel(request).await {
            Ok(true) => ChannelOpenDecision::accept(id),
            Ok(false) => ChannelOpenDecision::reject(id),
            Err(e) => {
                warn!(
                    target: "lndwarden::acceptor",
                    pending_chan_id = %request.pending_chan_id,
                    peer = %request.peer_pubkey,
                    funding_amt = request.funding_amt,
                    error = %e,
                    "Peer classification failed, rejecting"
                );
                ChannelOpenDecision::reject(id)
            }
        }
    }
}

impl std::fmt::Debug for ChannelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelPolicy")
            .field("sizes", &self.sizes)
            .field("classify_timeout", &self.classify_timeout)
            .finish_non_exhaustive()
    }
}
