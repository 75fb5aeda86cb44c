//! Feed monitor toggles.

use serde::Deserialize;

/// Which read-only feeds get a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MonitorsConfig {
    /// Log HTLC events.
    #[serde(default = "default_htlc_events")]
    pub htlc_events: bool,
    /// Log channel graph updates. Off by default, the feed is very chatty.
    #[serde(default)]
    pub graph_updates: bool,
}

const fn default_htlc_events() -> bool {
    true
}

impl Default for MonitorsConfig {
    fn default() -> Self {
        Self {
            htlc_events: default_htlc_events(),
            graph_updates: false,
        }
    }
}
