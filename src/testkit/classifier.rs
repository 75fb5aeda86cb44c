//! Scripted [`PeerClassifier`].

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::PeerPubkey;
use crate::error::{Error, Result};
use crate::port::PeerClassifier;

/// Classifier with per-peer answers, failures and delays.
///
/// Peers not listed get the default answer.
#[derive(Debug, Default)]
pub struct ScriptedClassifier {
    default_private: bool,
    private: HashSet<PeerPubkey>,
    public: HashSet<PeerPubkey>,
    failing: HashSet<PeerPubkey>,
    delays: HashMap<PeerPubkey, Duration>,
    calls: Arc<AtomicU32>,
}

impl ScriptedClassifier {
    /// Every unlisted peer is private.
    pub fn all_private() -> Self {
        Self {
            default_private: true,
            ..Self::default()
        }
    }

    /// Every unlisted peer is public.
    pub fn all_public() -> Self {
        Self::default()
    }

    pub fn with_private(mut self, pubkey: impl Into<PeerPubkey>) -> Self {
        self.private.insert(pubkey.into());
        self
    }

    pub fn with_public(mut self, pubkey: impl Into<PeerPubkey>) -> Self {
        self.public.insert(pubkey.into());
        self
    }

    /// Classification of this peer fails.
    pub fn with_failure(mut self, pubkey: impl Into<PeerPubkey>) -> Self {
        self.failing.insert(pubkey.into());
        self
    }

    /// Classification of this peer takes `delay`.
    pub fn with_delay(mut self, pubkey: impl Into<PeerPubkey>, delay: Duration) -> Self {
        self.delays.insert(pubkey.into(), delay);
        self
    }

    /// Shared counter of `is_private` calls.
    pub fn calls(&self) -> Arc<AtomicU32> {
        self.calls.clone()
    }
}

#[async_trait]
impl PeerClassifier for ScriptedClassifier {
    async fn is_private(&self, pubkey: &PeerPubkey) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(pubkey) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(pubkey) {
            return Err(Error::Classification {
                pubkey: pubkey.to_string(),
                reason: "scripted failure".into(),
            });
        }
        if self.private.contains(pubkey) {
            return Ok(true);
        }
        if self.public.contains(pubkey) {
            return Ok(false);
        }
        Ok(self.default_private)
    }
}
