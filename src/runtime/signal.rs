//! OS termination signals.

use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;

/// A process termination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    /// SIGINT / Ctrl+C.
    Interrupt,
    /// SIGTERM.
    Terminate,
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => f.write_str("SIGINT"),
            Self::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Source of termination requests watched by the supervisor.
#[async_trait]
pub trait TerminationSource: Send {
    /// Next request; `None` once the source can produce no more.
    async fn recv(&mut self) -> Option<TerminationSignal>;

    /// Called once when shutdown begins.
    fn begin_shutdown(&mut self) {}
}

/// A source that never fires. For embedding the supervisor where shutdown
/// is only ever triggered through a [`ShutdownHandle`](super::ShutdownHandle).
#[derive(Debug, Default)]
pub struct NoSignals;

#[async_trait]
impl TerminationSource for NoSignals {
    async fn recv(&mut self) -> Option<TerminationSignal> {
        std::future::pending().await
    }
}

/// SIGINT and SIGTERM of the current process.
///
/// Once shutdown begins SIGTERM is no longer read. Its tokio handler stays
/// installed, so a later SIGTERM is ignored rather than terminating the
/// process. A repeated SIGINT is ignored by the supervisor. Either way the
/// grace period is bounded by the shutdown watchdog.
#[cfg(unix)]
pub struct OsSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: Option<tokio::signal::unix::Signal>,
}

#[cfg(unix)]
impl OsSignals {
    /// Register the signal listeners. Must be called inside a runtime.
    pub fn install() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: Some(signal(SignalKind::terminate())?),
        })
    }
}

#[cfg(unix)]
#[async_trait]
impl TerminationSource for OsSignals {
    async fn recv(&mut self) -> Option<TerminationSignal> {
        let Self {
            interrupt,
            terminate,
        } = self;
        let terminate = async {
            match terminate.as_mut() {
                Some(sig) => sig.recv().await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            received = interrupt.recv() => received.map(|()| TerminationSignal::Interrupt),
            received = terminate => received.map(|()| TerminationSignal::Terminate),
        }
    }

    fn begin_shutdown(&mut self) {
        if self.terminate.take().is_some() {
            debug!("Ignoring SIGTERM until exit");
        }
    }
}

#[cfg(not(unix))]
pub struct OsSignals;

#[cfg(not(unix))]
impl OsSignals {
    pub fn install() -> Result<Self> {
        Ok(Self)
    }
}

#[cfg(not(unix))]
#[async_trait]
impl TerminationSource for OsSignals {
    async fn recv(&mut self) -> Option<TerminationSignal> {
        tokio::signal::ctrl_c()
            .await
            .ok()
            .map(|()| TerminationSignal::Interrupt)
    }
}
