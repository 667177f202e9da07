//! stackup - install and manage self-hosted container services

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use stackup_cli::cli::Cli;
use stackup_cli::domain::StartupError;
use stackup_cli::output::json::format_error;

/// Exit code for an unrecoverable startup failure (privilege, platform).
const EXIT_STARTUP: u8 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("STACKUP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            let startup = e.downcast_ref::<StartupError>().is_some();
            let code = if startup { "STARTUP_FAILED" } else { "OPERATION_FAILED" };
            match (json, format_error(&format!("{e:#}"), code)) {
                (true, Ok(obj)) => println!("{obj}"),
                _ => eprintln!("Error: {e:#}"),
            }
            if startup {
                ExitCode::from(EXIT_STARTUP)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
