//! `agent-installer experiment`: run or end the experimental agent.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::experiment::{start_agent_experiment, stop_agent_experiment};
use crate::output::JsonRenderer;

/// Experiment subcommands.
#[derive(Subcommand)]
pub enum ExperimentCommand {
    /// Start the experimental agent unit
    Start,
    /// Stop the experimental agent and restart the stable one
    Stop,
}

/// Run the experiment command.
///
/// # Errors
///
/// Returns the failing unit operation.
pub async fn run(app: &AppContext, cmd: ExperimentCommand) -> Result<ExitCode> {
    let (action, message) = match cmd {
        ExperimentCommand::Start => {
            start_agent_experiment(&app.host, &app.units, &app.cancel).await?;
            ("experiment start", "Experimental agent started")
        }
        ExperimentCommand::Stop => {
            stop_agent_experiment(&app.host, &app.units, &app.cancel).await?;
            ("experiment stop", "Experimental agent stopped, stable agent started")
        }
    };

    if app.is_json() {
        JsonRenderer.render_done(action)?;
    } else {
        app.output.success(message);
    }
    Ok(ExitCode::SUCCESS)
}
