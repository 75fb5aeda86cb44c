//! Peer classification through the channel graph.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use tracing::debug;

use super::client::{LndConnection, MACAROON_HEADER};
use super::dto::NodeInfoDto;
use crate::domain::PeerPubkey;
use crate::error::{Error, Result};
use crate::port::PeerClassifier;

/// Classifies a peer as private when the node graph does not know it or
/// knows it without any channel.
pub struct GraphClassifier {
    http: reqwest::Client,
    connection: LndConnection,
}

impl GraphClassifier {
    /// `timeout` bounds both connecting and each whole request.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn new(connection: LndConnection, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let macaroon = HeaderValue::from_str(connection.macaroon_hex())
            .map_err(|e| Error::Connection(format!("invalid macaroon header: {e}")))?;
        headers.insert(MACAROON_HEADER, macaroon);

        let http = reqwest::Client::builder()
            .use_preconfigured_tls((*connection.tls_config()).clone())
            .default_headers(headers)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self { http, connection })
    }
}

#[async_trait]
impl PeerClassifier for GraphClassifier {
    async fn is_private(&self, pubkey: &PeerPubkey) -> Result<bool> {
        let url = self.connection.http_url(&format!(
            "/v1/graph/node/{}?include_channels=false",
            pubkey.as_str()
        ))?;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            let info: NodeInfoDto = response.json().await?;
            debug!(peer = %pubkey, num_channels = info.num_channels, "Peer found in graph");
            return Ok(info.num_channels == 0);
        }

        let body = response.text().await.unwrap_or_default();
        if is_unknown_node(status, &body) {
            debug!(peer = %pubkey, "Peer not in graph");
            return Ok(true);
        }

        Err(Error::Classification {
            pubkey: pubkey.to_string(),
            reason: format!("graph lookup returned {status}: {}", body.trim()),
        })
    }
}

/// The gateway answers 404 for unknown nodes; older versions answer 500
/// with the lnd error text instead.
fn is_unknown_node(status: StatusCode, body: &str) -> bool {
    status == StatusCode::NOT_FOUND || body.contains("unable to find node")
}

#[cfg(test)]
mod tests {
    use tokio::net::TcpListener;

    use super::*;

    const PINNED_PEM: &[u8] = b"-----BEGIN CERTIFICATE-----\nAgEC\n-----END CERTIFICATE-----\n";

    #[test]
    fn not_found_means_unknown() {
        assert!(is_unknown_node(StatusCode::NOT_FOUND, ""));
    }

    #[test]
    fn lnd_error_text_means_unknown() {
        let body = r#"{"code":2,"message":"unable to find node"}"#;
        assert!(is_unknown_node(StatusCode::INTERNAL_SERVER_ERROR, body));
    }

    #[test]
    fn other_failures_are_not_unknown() {
        assert!(!is_unknown_node(StatusCode::UNAUTHORIZED, "verification failed"));
    }

    #[tokio::test]
    async fn unresponsive_node_fails_within_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(3600)).await;
            drop(socket);
        });

        let connection =
            LndConnection::new(&format!("http://{addr}"), PINNED_PEM, &[0x02, 0x01]).unwrap();
        let classifier = GraphClassifier::new(connection, Duration::from_millis(100)).unwrap();
        let peer = PeerPubkey::new("02".repeat(33));

        let result = tokio::time::timeout(Duration::from_secs(5), classifier.is_private(&peer))
            .await
            .unwrap();

        assert!(result.is_err());
        server.abort();
    }
}
