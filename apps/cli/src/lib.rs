//! # drivecost CLI
//!
//! Command line front end for the drivecost cost engine and profile store.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    drivecost Startup                                    │
//! │                                                                         │
//! │  1. Parse arguments (clap)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Initialize tracing (stderr, RUST_LOG or --verbose)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Load config: defaults → TOML file → env → flags, then validate      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. Dispatch the command (opens the store only when needed)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. Exit status: 0 ok, 2 invalid input/profile, 3 not found,            │
//! │     4 config, 1 anything else                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//! ```text
//! src/
//! ├── main.rs       ◄─── Entry point
//! ├── lib.rs        ◄─── You are here (tracing, run)
//! ├── cli.rs        ◄─── Argument definitions
//! ├── config.rs     ◄─── AppConfig (TOML + env)
//! ├── error.rs      ◄─── AppError with exit codes
//! ├── render.rs     ◄─── Tables, CSV, JSON
//! └── commands/     ◄─── One module per command
//! ```

use std::io::Write;

use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

use cli::Cli;
use commands::{Context, Outcome};
use config::AppConfig;
use error::AppResult;

/// Initializes logging on stderr.
///
/// `RUST_LOG` wins when set. Otherwise only warnings, plus info (debug with
/// `verbose`) from the drivecost crates.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,drivecost=debug,sqlx=warn"
    } else {
        "warn,drivecost=info,sqlx=warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads configuration and runs the parsed command, writing results to `out`.
pub async fn run(cli: Cli, out: &mut impl Write) -> AppResult<Outcome> {
    let mut config = AppConfig::load(cli.config.as_deref())?;

    if let Some(path) = cli.db {
        config.database.path = Some(path);
    }
    if let Some(format) = cli.output {
        config.output.format = format;
    }
    config.validate()?;

    debug!(?config, "Effective configuration");

    let ctx = Context {
        config,
        config_path: cli.config,
    };
    commands::dispatch(cli.command, &ctx, out).await
}
