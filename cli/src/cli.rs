//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Install and manage self-hosted container services on this machine
#[derive(Parser)]
#[command(name = "stackup", version, propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Answer prompts with their defaults; skips the removal confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Interactive menu (default)
    Menu,

    /// Install the container runtime if it is missing
    Runtime,

    /// Install a component
    Install(commands::install::InstallArgs),

    /// Stop and remove a component
    Remove(commands::remove::RemoveArgs),

    /// Show runtime and component status
    Status,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if startup checks or the command fail.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        });

        match command.unwrap_or(Command::Menu) {
            Command::Version => commands::version::run(&app),
            Command::Status => commands::status::run(&app).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Menu => {
                let session = app.start_session().await?;
                commands::menu::run(&app, &session).await
            }
            Command::Runtime => {
                let session = app.start_session().await?;
                commands::runtime::run(&app, &session).await
            }
            Command::Install(args) => {
                let session = app.start_session().await?;
                commands::install::run(&app, &session, &args).await
            }
            Command::Remove(args) => {
                let session = app.start_session().await?;
                commands::remove::run(&app, &session, &args).await
            }
        }
    }
}
