//! Infrastructure configuration modules.

pub mod acceptor;
pub mod logging;
pub mod monitors;
pub mod node;
pub mod settings;
pub mod supervisor;

pub use settings::Config;
