//! Logging configuration and initialization.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Deserialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::error::{ConfigError, Result};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive. `RUST_LOG` takes precedence.
    #[serde(default = "default_level")]
    pub level: String,
    /// `pretty` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
    /// Also append log lines to this file, relative to the home directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "info".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl LoggingConfig {
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }

    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// # Errors
    ///
    /// Fails if the log file cannot be opened or a global subscriber is
    /// already installed.
    #[allow(clippy::result_large_err)]
    pub fn init(&self, home: &Path) -> Result<()> {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
        layers.push(if self.is_json() {
            fmt::layer().json().boxed()
        } else {
            fmt::layer().boxed()
        });

        if let Some(file) = &self.file {
            let path = home.join(file);
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir).map_err(|source| ConfigError::LogFile {
                    path: path.clone(),
                    source,
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| ConfigError::LogFile {
                    path: path.clone(),
                    source,
                })?;
            let writer = Mutex::new(file);
            layers.push(if self.is_json() {
                fmt::layer().json().with_writer(writer).boxed()
            } else {
                fmt::layer().with_ansi(false).with_writer(writer).boxed()
            });
        }

        tracing_subscriber::registry()
            .with(layers)
            .with(filter)
            .try_init()
            .map_err(|e| ConfigError::InvalidValue {
                field: "logging",
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_to_pretty_info() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.is_json());
        assert!(config.file.is_none());
    }

    #[test]
    fn unwritable_log_file_is_a_config_error() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join("blocker"), b"").unwrap();
        let config = LoggingConfig {
            file: Some(PathBuf::from("blocker/lndwarden.log")),
            ..LoggingConfig::default()
        };

        let err = config.init(home.path()).unwrap_err();

        assert!(matches!(err, Error::Config(ConfigError::LogFile { .. })));
    }
}
