//! Scripted termination signals.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::runtime::{TerminationSignal, TerminationSource};

/// A [`TerminationSource`] fed through a channel.
///
/// Dropping the sender ends the source.
pub struct ScriptedSignals {
    rx: mpsc::Receiver<TerminationSignal>,
    shutdown_begun: Arc<AtomicBool>,
}

impl ScriptedSignals {
    /// Flag set once the supervisor called `begin_shutdown`.
    pub fn shutdown_begun(&self) -> Arc<AtomicBool> {
        self.shutdown_begun.clone()
    }
}

/// Create a scripted source and the sender that drives it.
pub fn scripted_signals() -> (ScriptedSignals, mpsc::Sender<TerminationSignal>) {
    let (tx, rx) = mpsc::channel(8);
    (
        ScriptedSignals {
            rx,
            shutdown_begun: Arc::new(AtomicBool::new(false)),
        },
        tx,
    )
}

#[async_trait]
impl TerminationSource for ScriptedSignals {
    async fn recv(&mut self) -> Option<TerminationSignal> {
        self.rx.recv().await
    }

    fn begin_shutdown(&mut self) {
        self.shutdown_begun.store(true, Ordering::SeqCst);
    }
}
