//! Supervised unit contract.

use async_trait::async_trait;

use super::shutdown::Shutdown;
use crate::error::Result;

/// A long-lived consumer run by the [`Supervisor`](super::Supervisor).
///
/// A unit must return promptly once `shutdown` is triggered, and must treat
/// shutdown as a normal exit (`Ok(())`), never as an error.
#[async_trait]
pub trait ServiceUnit: Send {
    /// Stable name used in logs and in the run report.
    fn name(&self) -> &'static str;

    async fn run(self: Box<Self>, shutdown: Shutdown) -> Result<()>;
}
