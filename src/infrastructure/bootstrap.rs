//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::lnd::{GraphClassifier, LndClient, LndConnection};
use crate::application::{ChannelAcceptor, ChannelPolicy, FeedMonitor, Heartbeat};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{NodeClient, PeerClassifier};
use crate::runtime::{OsSignals, RunReport, Supervisor};

/// Connect to the configured node and build the shared client and the
/// graph classifier on top of the same credentials.
pub fn connect_node(config: &Config) -> Result<(Arc<dyn NodeClient>, Arc<dyn PeerClassifier>)> {
    let credentials = config.node.credentials(&config.home)?;
    let connection = LndConnection::from_files(&config.node.rest_url, &credentials)?;
    info!(
        rest_url = %connection.rest_url(),
        tls_cert = %credentials.tls_cert.display(),
        macaroon = %credentials.macaroon.display(),
        "Node credentials loaded"
    );

    let classifier: Arc<dyn PeerClassifier> = Arc::new(GraphClassifier::new(
        connection.clone(),
        config.channel_acceptor.classify_timeout(),
    )?);
    let node: Arc<dyn NodeClient> = Arc::new(LndClient::new(connection));
    Ok((node, classifier))
}

/// Build a supervisor with every unit the configuration enables.
pub fn build_supervisor(
    config: &Config,
    node: Arc<dyn NodeClient>,
    classifier: Arc<dyn PeerClassifier>,
) -> Supervisor {
    let mut supervisor = Supervisor::new(node.clone(), config.supervisor.settings());

    if config.channel_acceptor.enabled {
        let policy = config.size_policy();
        if policy.private.min >= policy.private.max || policy.public.min >= policy.public.max {
            warn!(?policy, "Empty size range configured, some peers will always be rejected");
        }
        supervisor.add_unit(ChannelAcceptor::new(
            node.clone(),
            ChannelPolicy::new(policy, classifier)
                .with_classify_timeout(config.channel_acceptor.classify_timeout()),
            config.channel_acceptor.queue_depth,
        ));
    }
    if config.monitors.htlc_events {
        supervisor.add_unit(FeedMonitor::htlc_events(node.clone()));
    }
    if config.monitors.graph_updates {
        supervisor.add_unit(FeedMonitor::graph_updates(node));
    }
    supervisor.add_unit(Heartbeat::new(config.supervisor.heartbeat_interval()));

    supervisor
}

/// Run the daemon until a termination signal or until every unit stopped.
pub async fn run(config: &Config) -> Result<RunReport> {
    let (node, classifier) = connect_node(config)?;
    let signals = OsSignals::install()?;
    let supervisor = build_supervisor(config, node, classifier);
    Ok(supervisor.run(signals).await)
}
