//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all daemon settings.
//! Configuration lives in `lndwarden.toml` inside the home directory; a
//! missing file means every setting takes its default.
//!
//! # Example
//!
//! ```no_run
//! use lndwarden::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_from_home(None, None)?;
//!     config.init_logging()?;
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::acceptor::ChannelAcceptorConfig;
use super::logging::LoggingConfig;
use super::monitors::MonitorsConfig;
use super::node::NodeConfig;
use super::supervisor::SupervisorConfig;
use crate::domain::SizePolicy;
use crate::error::{ConfigError, Result};

/// Environment variable overriding the home directory. Must be absolute.
pub const HOME_ENV: &str = "LNDWARDEN_HOME";

/// Configuration file name inside the home directory.
pub const CONFIG_FILE_NAME: &str = "lndwarden.toml";

/// Main application configuration.
///
/// Load from the home directory with [`Config::load_from_home`], from an
/// explicit file with [`Config::load`], or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Node connection and credentials.
    #[serde(default)]
    pub node: NodeConfig,

    /// Channel acceptance thresholds and queue depth.
    #[serde(default)]
    pub channel_acceptor: ChannelAcceptorConfig,

    /// Which read-only feeds are logged.
    #[serde(default)]
    pub monitors: MonitorsConfig,

    /// Shutdown, heartbeat and failure policy.
    #[serde(default)]
    pub supervisor: SupervisorConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Directory relative paths are resolved against. Not read from TOML.
    #[serde(skip)]
    pub home: PathBuf,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed, a threshold is
    /// not a non-negative integer, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Resolve the home directory and load its configuration.
    ///
    /// `config_path` replaces `<home>/lndwarden.toml` and must exist. The
    /// default file may be missing, in which case defaults apply.
    ///
    /// # Errors
    ///
    /// Fails on an unresolvable home directory or an invalid file.
    #[allow(clippy::result_large_err)]
    pub fn load_from_home(home: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let home = resolve_home(home, std::env::var_os(HOME_ENV).map(PathBuf::from))?;

        let mut config = match config_path {
            Some(path) => Self::load(path)?,
            None => {
                let path = home.join(CONFIG_FILE_NAME);
                if path.exists() {
                    Self::load(path)?
                } else {
                    Self::parse_toml("")?
                }
            }
        };
        config.home = home;
        Ok(config)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.node.rest_url.is_empty() {
            return Err(ConfigError::MissingField { field: "rest_url" }.into());
        }
        url::Url::parse(&self.node.rest_url).map_err(|e| ConfigError::InvalidValue {
            field: "rest_url",
            reason: e.to_string(),
        })?;
        if self.channel_acceptor.queue_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "queue_depth",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.channel_acceptor.classify_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "classify_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.supervisor.shutdown_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "shutdown_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.supervisor.heartbeat_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "heartbeat_interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected \"pretty\" or \"json\", got {:?}", self.logging.format),
            }
            .into());
        }
        Ok(())
    }

    /// Size thresholds for the channel acceptor.
    #[must_use]
    pub const fn size_policy(&self) -> SizePolicy {
        self.channel_acceptor.size_policy()
    }

    /// Initialize logging with the configured settings.
    #[allow(clippy::result_large_err)]
    pub fn init_logging(&self) -> Result<()> {
        self.logging.init(&self.home)
    }
}

/// Pick the home directory: explicit, then the environment, then
/// `~/.lndwarden`.
///
/// # Errors
///
/// Fails when the environment value is relative or no user home exists.
#[allow(clippy::result_large_err)]
pub fn resolve_home(explicit: Option<&Path>, from_env: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = from_env {
        if !path.is_absolute() {
            return Err(ConfigError::HomeDir(format!(
                "{HOME_ENV} must be an absolute path, got {}",
                path.display()
            ))
            .into());
        }
        return Ok(path);
    }
    dirs::home_dir()
        .map(|h| h.join(".lndwarden"))
        .ok_or_else(|| ConfigError::HomeDir("user home directory not found".into()).into())
}
