//! Command dispatch and exit codes.

use std::process::ExitCode;

use tracing::error;

use super::command::{Cli, Commands};
use super::{check, run};

/// Execute a parsed command and map the outcome to a process exit code.
pub async fn execute(cli: Cli) -> ExitCode {
    match cli.command {
        Commands::Run(args) => match run::execute(&args).await {
            Ok(report) if report.is_clean() => ExitCode::SUCCESS,
            Ok(report) => {
                error!(
                    failed = ?report.failed,
                    aborted = ?report.aborted,
                    "Some units did not stop cleanly"
                );
                ExitCode::FAILURE
            }
            Err(e) => {
                error!(error = %e, "Fatal error");
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        },
        Commands::CheckConfig(args) => match check::execute(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}
