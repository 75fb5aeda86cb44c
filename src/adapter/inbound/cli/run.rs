//! Handler for the `run` command.

use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;
use crate::runtime::RunReport;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<RunReport> {
    let mut config =
        Config::load_from_home(args.location.home.as_deref(), args.location.config.as_deref())?;
    apply_overrides(&mut config, args);
    config.init_logging()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        home = %config.home.display(),
        "lndwarden starting"
    );

    let report = bootstrap::run(&config).await?;

    info!(
        completed = ?report.completed,
        failed = report.failed.len(),
        aborted = ?report.aborted,
        "lndwarden stopped"
    );
    Ok(report)
}

fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if args.json_logs {
        config.logging.format = "json".into();
    }
}
