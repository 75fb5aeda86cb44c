//! Unit lifecycle: shutdown propagation, signals and supervision.

mod shutdown;
mod signal;
mod supervisor;
mod unit;

pub use shutdown::{channel as shutdown_channel, Shutdown, ShutdownHandle};
pub use signal::{NoSignals, OsSignals, TerminationSignal, TerminationSource};
pub use supervisor::{RunReport, Supervisor, SupervisorSettings, DEFAULT_SHUTDOWN_TIMEOUT};
pub use unit::ServiceUnit;
