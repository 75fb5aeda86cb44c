use std::process::ExitCode;

use clap::Parser;
use lndwarden::adapter::inbound::cli::{command::Cli, dispatch};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    dispatch::execute(cli).await
}
