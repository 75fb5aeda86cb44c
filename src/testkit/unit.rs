//! Minimal [`ServiceUnit`]s with fixed behavior.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::runtime::{ServiceUnit, Shutdown};

/// Waits for shutdown, then returns `Ok(())`.
pub struct IdleUnit {
    name: &'static str,
}

impl IdleUnit {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl ServiceUnit for IdleUnit {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(self: Box<Self>, mut shutdown: Shutdown) -> Result<()> {
        shutdown.triggered().await;
        Ok(())
    }
}

/// Fails immediately.
pub struct FailingUnit {
    name: &'static str,
}

impl FailingUnit {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl ServiceUnit for FailingUnit {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(self: Box<Self>, _shutdown: Shutdown) -> Result<()> {
        Err(Error::Connection("scripted failure".into()))
    }
}

/// Panics immediately.
pub struct PanickingUnit {
    name: &'static str,
}

impl PanickingUnit {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl ServiceUnit for PanickingUnit {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(self: Box<Self>, _shutdown: Shutdown) -> Result<()> {
        panic!("scripted panic")
    }
}

/// Never returns, shutdown or not.
pub struct StubbornUnit {
    name: &'static str,
}

impl StubbornUnit {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl ServiceUnit for StubbornUnit {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(self: Box<Self>, _shutdown: Shutdown) -> Result<()> {
        std::future::pending().await
    }
}
