//! LND REST gateway client.
//!
//! Every stream is its own WebSocket to the gateway. The client itself
//! holds no socket, only the endpoint and credentials, so it can be shared
//! by all units and "disconnecting" means refusing to open new streams.

use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use rustls::ClientConfig;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async_tls_with_config, Connector};
use tracing::{debug, info};
use url::Url;

use super::stream::{WsDecisionSink, WsFeed, WsRequestStream, WsStream};
use super::tls;
use crate::domain::FeedKind;
use crate::error::{Error, Result};
use crate::infrastructure::config::node::NodeCredentials;
use crate::port::{AcceptorChannel, EventFeed, NodeClient};

/// Header carrying the hex-encoded macaroon.
pub const MACAROON_HEADER: &str = "Grpc-Metadata-Macaroon";

const CHANNEL_ACCEPTOR_PATH: &str = "/v1/channels/acceptor?method=POST";
const GRAPH_SUBSCRIBE_PATH: &str = "/v1/graph/subscribe?method=GET";
const HTLC_EVENTS_PATH: &str = "/v2/router/htlcevents?method=GET";

/// Endpoint and credentials shared by the node client and the classifier.
#[derive(Clone)]
pub struct LndConnection {
    rest_url: Url,
    macaroon_hex: String,
    tls: Arc<ClientConfig>,
}

impl LndConnection {
    /// Build from PEM certificate bytes and raw macaroon bytes.
    ///
    /// # Errors
    ///
    /// Fails on an unparseable URL or certificate.
    pub fn new(rest_url: &str, tls_cert_pem: &[u8], macaroon: &[u8]) -> Result<Self> {
        let rest_url = Url::parse(rest_url)?;
        if !matches!(rest_url.scheme(), "https" | "http") {
            return Err(Error::Connection(format!(
                "unsupported scheme {:?} in rest_url",
                rest_url.scheme()
            )));
        }
        Ok(Self {
            rest_url,
            macaroon_hex: hex::encode(macaroon),
            tls: tls::client_config(tls_cert_pem)?,
        })
    }

    /// Read the certificate and macaroon from disk.
    ///
    /// # Errors
    ///
    /// Fails if either file cannot be read, or as [`LndConnection::new`].
    pub fn from_files(rest_url: &str, credentials: &NodeCredentials) -> Result<Self> {
        let cert = fs::read(&credentials.tls_cert).map_err(|e| {
            Error::Connection(format!(
                "cannot read TLS certificate {}: {e}",
                credentials.tls_cert.display()
            ))
        })?;
        let macaroon = fs::read(&credentials.macaroon).map_err(|e| {
            Error::Connection(format!(
                "cannot read macaroon {}: {e}",
                credentials.macaroon.display()
            ))
        })?;
        Self::new(rest_url, &cert, &macaroon)
    }

    #[must_use]
    pub fn rest_url(&self) -> &Url {
        &self.rest_url
    }

    #[must_use]
    pub fn macaroon_hex(&self) -> &str {
        &self.macaroon_hex
    }

    #[must_use]
    pub fn tls_config(&self) -> Arc<ClientConfig> {
        self.tls.clone()
    }

    /// Gateway URL for an HTTP path.
    pub fn http_url(&self, path_and_query: &str) -> Result<Url> {
        Ok(self.rest_url.join(path_and_query)?)
    }

    /// Gateway URL for a WebSocket path.
    pub fn ws_url(&self, path_and_query: &str) -> Result<Url> {
        let mut url = self.http_url(path_and_query)?;
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme)
            .map_err(|()| Error::Connection(format!("cannot use {scheme} for {url}")))?;
        Ok(url)
    }

    async fn open_socket(&self, path_and_query: &str) -> Result<WsStream> {
        let url = self.ws_url(path_and_query)?;
        debug!(url = %url, "Connecting to WebSocket");

        let mut request = url.as_str().into_client_request()?;
        let macaroon = HeaderValue::from_str(&self.macaroon_hex)
            .map_err(|e| Error::Connection(format!("invalid macaroon header: {e}")))?;
        request.headers_mut().insert(MACAROON_HEADER, macaroon);

        let connector = Connector::Rustls(self.tls.clone());
        let (ws, response) =
            connect_async_tls_with_config(request, None, false, Some(connector)).await?;

        debug!(status = %response.status(), path = path_and_query, "WebSocket connected");
        Ok(ws)
    }
}

impl std::fmt::Debug for LndConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LndConnection")
            .field("rest_url", &self.rest_url.as_str())
            .finish_non_exhaustive()
    }
}

/// [`NodeClient`] over the LND REST gateway.
pub struct LndClient {
    connection: LndConnection,
    name: String,
    closed: AtomicBool,
}

impl LndClient {
    pub fn new(connection: LndConnection) -> Self {
        let name = connection
            .rest_url
            .host_str()
            .map_or_else(|| "lnd".to_string(), |host| format!("lnd@{host}"));
        Self {
            connection,
            name,
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(Error::Connection("node client disconnected".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl NodeClient for LndClient {
    async fn open_channel_acceptor(&self) -> Result<AcceptorChannel> {
        self.ensure_open()?;
        let ws = self.connection.open_socket(CHANNEL_ACCEPTOR_PATH).await?;
        let (sink, source) = ws.split();
        info!(node = %self.name, "Channel acceptor stream opened");
        Ok(AcceptorChannel::new(
            WsRequestStream::new(source),
            WsDecisionSink::new(sink),
        ))
    }

    async fn subscribe(&self, feed: FeedKind) -> Result<Box<dyn EventFeed>> {
        self.ensure_open()?;
        let path = match feed {
            FeedKind::GraphTopology => GRAPH_SUBSCRIBE_PATH,
            FeedKind::HtlcEvents => HTLC_EVENTS_PATH,
        };
        let mut ws = self.connection.open_socket(path).await?;
        ws.send(Message::Text("{}".into())).await?;
        info!(node = %self.name, feed = %feed, "Feed subscribed");
        Ok(Box::new(WsFeed::new(feed, ws)))
    }

    async fn disconnect(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            info!(node = %self.name, "Disconnected from node");
        }
    }

    fn node_name(&self) -> &str {
        &self.name
    }
}
