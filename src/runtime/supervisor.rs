//! Service supervisor.
//!
//! Runs a fixed set of [`ServiceUnit`]s concurrently on one [`JoinSet`],
//! turns the first termination signal into a shared shutdown, bounds the
//! shutdown with a watchdog and releases the node connection exactly once
//! when everything has stopped.
//!
//! # Failure policy
//!
//! A unit that fails or panics is logged and recorded. By default the
//! other units keep running (isolation). With `cascade_on_failure` the
//! first failure shuts everything down instead.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use tokio::task::JoinSet;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info, warn};

use super::shutdown::{self, Shutdown, ShutdownHandle};
use super::signal::{TerminationSignal, TerminationSource};
use super::unit::ServiceUnit;
use crate::error::Result;
use crate::port::NodeClient;

/// Default grace period between shutdown and forced abort.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Supervisor tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorSettings {
    /// How long units get to stop after shutdown before they are aborted.
    pub shutdown_timeout: Duration,
    /// Shut down every unit when one fails.
    pub cascade_on_failure: bool,
}

impl Default for SupervisorSettings {
    fn default() -> Self {
        Self {
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            cascade_on_failure: false,
        }
    }
}

/// Outcome of one supervisor run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// First termination signal received, if any.
    pub signal: Option<TerminationSignal>,
    /// Units that returned `Ok(())`.
    pub completed: Vec<&'static str>,
    /// Units that returned an error or panicked, with the reason.
    pub failed: Vec<(&'static str, String)>,
    /// Units aborted by the watchdog.
    pub aborted: Vec<&'static str>,
}

impl RunReport {
    /// No unit failed and none had to be aborted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.aborted.is_empty()
    }
}

type UnitOutcome = std::thread::Result<Result<()>>;

/// Owner of the node connection and of every running unit.
pub struct Supervisor {
    node: Arc<dyn NodeClient>,
    settings: SupervisorSettings,
    units: Vec<Box<dyn ServiceUnit>>,
    handle: ShutdownHandle,
    shutdown: Shutdown,
}

impl Supervisor {
    /// Create a supervisor for an already connected node client.
    pub fn new(node: Arc<dyn NodeClient>, settings: SupervisorSettings) -> Self {
        let (handle, shutdown) = shutdown::channel();
        Self {
            node,
            settings,
            units: Vec::new(),
            handle,
            shutdown,
        }
    }

    /// Register a unit to start on [`run`](Self::run).
    pub fn add_unit(&mut self, unit: impl ServiceUnit + 'static) -> &mut Self {
        self.units.push(Box::new(unit));
        self
    }

    /// Register an already boxed unit.
    pub fn add_boxed_unit(&mut self, unit: Box<dyn ServiceUnit>) -> &mut Self {
        self.units.push(unit);
        self
    }

    /// Names of registered units, in registration order.
    #[must_use]
    pub fn unit_names(&self) -> Vec<&'static str> {
        self.units.iter().map(|u| u.name()).collect()
    }

    /// Handle to trigger shutdown without an OS signal.
    #[must_use]
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.handle.clone()
    }

    /// Run every unit until all of them have stopped.
    ///
    /// Returns only after the node connection has been released.
    pub async fn run<S: TerminationSource>(self, mut signals: S) -> RunReport {
        let Self {
            node,
            settings,
            units,
            handle,
            mut shutdown,
        } = self;

        let mut report = RunReport::default();
        let mut running: Vec<&'static str> = Vec::with_capacity(units.len());
        let mut tasks: JoinSet<(&'static str, UnitOutcome)> = JoinSet::new();

        for unit in units {
            let name = unit.name();
            let unit_shutdown = handle.subscribe();
            running.push(name);
            tasks.spawn(async move {
                let outcome = AssertUnwindSafe(unit.run(unit_shutdown))
                    .catch_unwind()
                    .await;
                (name, outcome)
            });
        }

        info!(units = ?running, node = node.node_name(), "Services started");

        let mut signals_open = true;
        let mut deadline: Option<Instant> = None;

        loop {
            let watchdog = async move {
                match deadline {
                    Some(at) => sleep_until(at).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                joined = tasks.join_next() => {
                    let Some(joined) = joined else {
                        break;
                    };
                    match joined {
                        Ok((name, outcome)) => {
                            running.retain(|n| *n != name);
                            let failed = record_outcome(&mut report, name, outcome);
                            if failed && settings.cascade_on_failure && handle.trigger() {
                                warn!(unit = name, "Unit failed, shutting down remaining units");
                            }
                        }
                        Err(e) => warn!(error = %e, "Unit task did not complete"),
                    }
                }
                received = signals.recv(), if signals_open => {
                    match received {
                        Some(signal) if report.signal.is_none() => {
                            info!(%signal, "Termination signal received, shutting down");
                            report.signal = Some(signal);
                            handle.trigger();
                        }
                        Some(signal) => {
                            debug!(%signal, "Ignoring repeated signal during shutdown");
                        }
                        None => signals_open = false,
                    }
                }
                () = shutdown.triggered(), if deadline.is_none() => {
                    signals.begin_shutdown();
                    deadline = Some(Instant::now() + settings.shutdown_timeout);
                    info!(
                        units = ?running,
                        timeout_secs = settings.shutdown_timeout.as_secs_f64(),
                        "Waiting for units to stop"
                    );
                }
                () = watchdog => {
                    error!(
                        units = ?running,
                        timeout_secs = settings.shutdown_timeout.as_secs_f64(),
                        "Units ignored shutdown, aborting"
                    );
                    tasks.abort_all();
                    while let Some(joined) = tasks.join_next().await {
                        if let Ok((name, outcome)) = joined {
                            running.retain(|n| *n != name);
                            record_outcome(&mut report, name, outcome);
                        }
                    }
                    report.aborted.append(&mut running);
                    break;
                }
            }
        }

        node.disconnect().await;
        info!(node = node.node_name(), "Node connection released");

        report
    }
}

/// Log and record one unit exit. Returns `true` for a failure.
fn record_outcome(report: &mut RunReport, name: &'static str, outcome: UnitOutcome) -> bool {
    match outcome {
        Ok(Ok(())) => {
            info!(unit = name, "Unit stopped");
            report.completed.push(name);
            false
        }
        Ok(Err(e)) => {
            error!(unit = name, error = %e, "Unit failed");
            report.failed.push((name, e.to_string()));
            true
        }
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            error!(unit = name, reason = %reason, "Unit panicked");
            report.failed.push((name, format!("panicked: {reason}")));
            true
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::node::MockNode;
    use crate::testkit::signal::scripted_signals;
    use crate::runtime::NoSignals;
    use crate::testkit::unit::{FailingUnit, IdleUnit, PanickingUnit, StubbornUnit};

    fn fast_settings() -> SupervisorSettings {
        SupervisorSettings {
            shutdown_timeout: Duration::from_millis(200),
            cascade_on_failure: false,
        }
    }

    #[tokio::test]
    async fn signal_stops_every_unit_and_disconnects_once() {
        let node = MockNode::new();
        let mut supervisor = Supervisor::new(node.client(), fast_settings());
        supervisor.add_unit(IdleUnit::new("alpha"));
        supervisor.add_unit(IdleUnit::new("beta"));

        let (signals, sender) = scripted_signals();
        let run = tokio::spawn(supervisor.run(signals));

        sender.send(TerminationSignal::Terminate).await.unwrap();
        let report = tokio::time::timeout(Duration::from_secs(2), run)
            .await
            .expect("supervisor should stop")
            .unwrap();

        assert_eq!(report.signal, Some(TerminationSignal::Terminate));
        assert!(report.is_clean());
        let mut completed = report.completed.clone();
        completed.sort_unstable();
        assert_eq!(completed, vec!["alpha", "beta"]);
        assert_eq!(node.disconnect_count(), 1);
    }

    #[tokio::test]
    async fn repeated_signals_are_ignored() {
        let node = MockNode::new();
        let mut supervisor = Supervisor::new(node.client(), fast_settings());
        supervisor.add_unit(IdleUnit::new("alpha"));

        let (signals, sender) = scripted_signals();
        sender.send(TerminationSignal::Interrupt).await.unwrap();
        sender.send(TerminationSignal::Interrupt).await.unwrap();
        sender.send(TerminationSignal::Terminate).await.unwrap();

        let report = supervisor.run(signals).await;

        assert_eq!(report.signal, Some(TerminationSignal::Interrupt));
        assert_eq!(report.completed, vec!["alpha"]);
        assert_eq!(node.disconnect_count(), 1);
    }

    #[tokio::test]
    async fn failing_unit_does_not_stop_siblings() {
        let node = MockNode::new();
        let mut supervisor = Supervisor::new(node.client(), fast_settings());
        supervisor.add_unit(FailingUnit::new("broken"));
        supervisor.add_unit(IdleUnit::new("steady"));
        let handle = supervisor.shutdown_handle();

        let (signals, _sender) = scripted_signals();
        let run = tokio::spawn(supervisor.run(signals));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!handle.is_triggered());
        assert!(!run.is_finished());

        handle.trigger();
        let report = run.await.unwrap();

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "broken");
        assert_eq!(report.completed, vec!["steady"]);
        assert_eq!(node.disconnect_count(), 1);
    }

    #[tokio::test]
    async fn cascade_policy_stops_siblings() {
        let node = MockNode::new();
        let settings = SupervisorSettings {
            cascade_on_failure: true,
            ..fast_settings()
        };
        let mut supervisor = Supervisor::new(node.client(), settings);
        supervisor.add_unit(FailingUnit::new("broken"));
        supervisor.add_unit(IdleUnit::new("steady"));

        let (signals, _sender) = scripted_signals();
        let report = tokio::time::timeout(Duration::from_secs(2), supervisor.run(signals))
            .await
            .expect("cascade should stop the supervisor");

        assert_eq!(report.signal, None);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.completed, vec!["steady"]);
        assert_eq!(node.disconnect_count(), 1);
    }

    #[tokio::test]
    async fn panicking_unit_is_recorded_as_failure() {
        let node = MockNode::new();
        let mut supervisor = Supervisor::new(node.client(), fast_settings());
        supervisor.add_unit(PanickingUnit::new("fragile"));

        let report = supervisor.run(scripted_signals().0).await;

        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].1.contains("panicked"));
        assert_eq!(node.disconnect_count(), 1);
    }

    #[tokio::test]
    async fn watchdog_aborts_units_that_ignore_shutdown() {
        let node = MockNode::new();
        let mut supervisor = Supervisor::new(node.client(), fast_settings());
        supervisor.add_unit(StubbornUnit::new("stubborn"));
        supervisor.add_unit(IdleUnit::new("polite"));

        let (signals, sender) = scripted_signals();
        sender.send(TerminationSignal::Interrupt).await.unwrap();

        let report = tokio::time::timeout(Duration::from_secs(2), supervisor.run(signals))
            .await
            .expect("watchdog should bound shutdown");

        assert_eq!(report.aborted, vec!["stubborn"]);
        assert_eq!(report.completed, vec!["polite"]);
        assert!(!report.is_clean());
        assert_eq!(node.disconnect_count(), 1);
    }

    #[tokio::test]
    async fn units_finishing_on_their_own_end_the_run() {
        let node = MockNode::new();
        let mut supervisor = Supervisor::new(node.client(), fast_settings());
        supervisor.add_unit(FailingUnit::new("one_shot"));

        let report = supervisor.run(scripted_signals().0).await;

        assert_eq!(report.signal, None);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(node.disconnect_count(), 1);
    }

    #[tokio::test]
    async fn empty_supervisor_still_releases_connection() {
        let node = MockNode::new();
        let supervisor = Supervisor::new(node.client(), fast_settings());
        assert!(supervisor.unit_names().is_empty());

        let report = supervisor.run(scripted_signals().0).await;

        assert!(report.is_clean());
        assert_eq!(node.disconnect_count(), 1);
    }

    #[tokio::test]
    async fn shutdown_handle_stops_run_without_signals() {
        let node = MockNode::new();
        let mut supervisor = Supervisor::new(node.client(), fast_settings());
        supervisor.add_boxed_unit(Box::new(IdleUnit::new("idle")));
        let handle = supervisor.shutdown_handle();

        let run = tokio::spawn(supervisor.run(NoSignals));
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.trigger();

        let report = tokio::time::timeout(Duration::from_secs(1), run)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(report.signal, None);
        assert_eq!(report.completed, vec!["idle"]);
        assert_eq!(node.disconnect_count(), 1);
    }
}
