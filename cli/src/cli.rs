//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// Install, remove and experiment with systemd-managed agent units
#[derive(Parser)]
#[command(
    name = "agent-installer",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true, env = "AGENT_INSTALLER_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install units, start the stable agent and record the install
    Setup,

    /// Stop and remove every unit, the symlink and the install record
    Remove,

    /// Start or stop the experimental agent
    #[command(subcommand)]
    Experiment(commands::experiment::ExperimentCommand),

    /// Show unit states and install artifacts
    Status(commands::status::StatusArgs),

    /// Show the effective configuration
    Config,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            config,
            json,
            quiet,
            no_color,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            config,
        })?;
        app.cancel_on_interrupt();

        match command {
            Command::Setup => commands::setup::run(&app).await,
            Command::Remove => commands::remove::run(&app).await,
            Command::Experiment(cmd) => commands::experiment::run(&app, cmd).await,
            Command::Status(args) => commands::status::run(&app, &args).await,
            Command::Config => commands::config::run(&app),
        }
    }
}
