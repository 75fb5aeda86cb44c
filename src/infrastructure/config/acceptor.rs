//! Channel acceptor configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::{DEFAULT_CLASSIFY_TIMEOUT, DEFAULT_QUEUE_DEPTH};
use crate::domain::{SizeBounds, SizePolicy, DEFAULT_MAX_CHANNEL_SIZE, DEFAULT_MIN_CHANNEL_SIZE};

/// Channel acceptor configuration.
///
/// Each threshold is defaulted on its own, so a section that sets only one
/// of them keeps the defaults for the rest. Both bounds are exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelAcceptorConfig {
    /// Run the channel acceptor at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Lower bound for peers without public channels, in satoshis.
    #[serde(default = "default_min_channel_size")]
    pub min_channel_size_private: u64,
    /// Upper bound for peers without public channels, in satoshis.
    #[serde(default = "default_max_channel_size")]
    pub max_channel_size_private: u64,
    /// Lower bound for peers with public channels, in satoshis.
    #[serde(default = "default_min_channel_size")]
    pub min_channel_size_public: u64,
    /// Upper bound for peers with public channels, in satoshis.
    #[serde(default = "default_max_channel_size")]
    pub max_channel_size_public: u64,
    /// Requests buffered between the stream reader and the decision emitter.
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
    /// Seconds a peer classification may take before the request is rejected.
    #[serde(default = "default_classify_timeout_secs")]
    pub classify_timeout_secs: u64,
}

const fn default_enabled() -> bool {
    true
}

const fn default_min_channel_size() -> u64 {
    DEFAULT_MIN_CHANNEL_SIZE
}

const fn default_max_channel_size() -> u64 {
    DEFAULT_MAX_CHANNEL_SIZE
}

const fn default_queue_depth() -> usize {
    DEFAULT_QUEUE_DEPTH
}

const fn default_classify_timeout_secs() -> u64 {
    DEFAULT_CLASSIFY_TIMEOUT.as_secs()
}

impl ChannelAcceptorConfig {
    /// The size thresholds as a domain policy.
    #[must_use]
    pub const fn size_policy(&self) -> SizePolicy {
        SizePolicy::new(
            SizeBounds::new(self.min_channel_size_private, self.max_channel_size_private),
            SizeBounds::new(self.min_channel_size_public, self.max_channel_size_public),
        )
    }

    #[must_use]
    pub const fn classify_timeout(&self) -> Duration {
        Duration::from_secs(self.classify_timeout_secs)
    }
}

impl Default for ChannelAcceptorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            min_channel_size_private: default_min_channel_size(),
            max_channel_size_private: default_max_channel_size(),
            min_channel_size_public: default_min_channel_size(),
            max_channel_size_public: default_max_channel_size(),
            queue_depth: default_queue_depth(),
            classify_timeout_secs: default_classify_timeout_secs(),
        }
    }
}
