//! Process-wide shutdown signal.
//!
//! One `watch` channel flipped from `false` to `true` exactly once. The
//! supervisor owns the [`ShutdownHandle`]; every unit gets its own
//! [`Shutdown`] receiver.

use std::sync::Arc;

use tokio::sync::watch;

/// Trigger side of the shutdown signal.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    /// Request shutdown. Returns `true` only for the call that flipped it.
    pub fn trigger(&self) -> bool {
        self.tx.send_if_modified(|stop| {
            if *stop {
                false
            } else {
                *stop = true;
                true
            }
        })
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// New receiver observing this handle.
    #[must_use]
    pub fn subscribe(&self) -> Shutdown {
        Shutdown {
            rx: self.tx.subscribe(),
        }
    }
}

/// Receiving side of the shutdown signal, one per unit.
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once shutdown has been requested.
    ///
    /// Also resolves if the handle is gone, since nobody can keep the unit
    /// alive any more.
    pub async fn triggered(&mut self) {
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}

/// Create a connected handle/receiver pair.
#[must_use]
pub fn channel() -> (ShutdownHandle, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx: Arc::new(tx) }, Shutdown { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_flips_only_once() {
        let (handle, shutdown) = channel();
        assert!(!shutdown.is_triggered());
        assert!(handle.trigger());
        assert!(!handle.trigger());
        assert!(shutdown.is_triggered());
        assert!(handle.subscribe().is_triggered());
    }

    #[tokio::test]
    async fn triggered_resolves_for_every_receiver() {
        let (handle, mut first) = channel();
        let mut second = handle.subscribe();

        let waiter = tokio::spawn(async move {
            first.triggered().await;
            second.triggered().await;
        });

        handle.trigger();
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn triggered_resolves_when_handle_dropped() {
        let (handle, mut shutdown) = channel();
        drop(handle);
        shutdown.triggered().await;
    }
}
