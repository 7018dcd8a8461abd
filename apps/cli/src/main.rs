//! drivecost command line entry point.

use std::process::ExitCode;

use clap::Parser;
use drivecost_cli::cli::Cli;
use drivecost_cli::{init_tracing, run};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut stdout = std::io::stdout();
    match run(cli, &mut stdout).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            tracing::debug!(code = ?err.code, "Command failed");
            eprintln!("error: {}", err.message);
            ExitCode::from(err.exit_code())
        }
    }
}
