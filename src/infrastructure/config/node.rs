//! LND connection configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Where the node's REST gateway lives and how to authenticate to it.
///
/// `tls_cert` and `macaroon` default to the standard locations inside
/// `lnd_dir` for the configured `network`. Relative paths are resolved
/// against the lndwarden home directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeConfig {
    /// REST gateway base URL.
    #[serde(default = "default_rest_url")]
    pub rest_url: String,
    /// LND data directory. Defaults to `~/.lnd`.
    #[serde(default)]
    pub lnd_dir: Option<PathBuf>,
    /// Bitcoin network LND runs on, used to locate the macaroon.
    #[serde(default = "default_network")]
    pub network: String,
    /// LND's TLS certificate.
    #[serde(default)]
    pub tls_cert: Option<PathBuf>,
    /// Macaroon sent with every request.
    #[serde(default)]
    pub macaroon: Option<PathBuf>,
}

fn default_rest_url() -> String {
    "https://localhost:8080".into()
}

fn default_network() -> String {
    "mainnet".into()
}

/// Resolved credential file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeCredentials {
    pub tls_cert: PathBuf,
    pub macaroon: PathBuf,
}

impl NodeConfig {
    /// Resolve certificate and macaroon paths.
    ///
    /// # Errors
    ///
    /// Fails when a default location is needed but the user home directory
    /// cannot be determined.
    #[allow(clippy::result_large_err)]
    pub fn credentials(&self, home: &Path) -> Result<NodeCredentials> {
        let lnd_dir = match &self.lnd_dir {
            Some(dir) => home.join(dir),
            None => dirs::home_dir()
                .map(|h| h.join(".lnd"))
                .ok_or_else(|| ConfigError::HomeDir("user home directory not found".into()))?,
        };

        let tls_cert = match &self.tls_cert {
            Some(path) => home.join(path),
            None => lnd_dir.join("tls.cert"),
        };
        let macaroon = match &self.macaroon {
            Some(path) => home.join(path),
            None => lnd_dir
                .join("data")
                .join("chain")
                .join("bitcoin")
                .join(&self.network)
                .join("admin.macaroon"),
        };

        Ok(NodeCredentials { tls_cert, macaroon })
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            rest_url: default_rest_url(),
            lnd_dir: None,
            network: default_network(),
            tls_cert: None,
            macaroon: None,
        }
    }
}
