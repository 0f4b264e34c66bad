//! `agent-installer status`: report unit states and install artifacts.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use installer_common::Channel;

use crate::app::AppContext;
use crate::application::services::status::inspect;

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {
    /// Only list units of this channel
    #[arg(long, value_enum)]
    pub channel: Option<Channel>,
}

/// Run the status command.
///
/// # Errors
///
/// Returns an error if any unit or artifact cannot be queried.
pub async fn run(app: &AppContext, args: &StatusArgs) -> Result<ExitCode> {
    let status = inspect(&app.host, &app.units, &app.cancel).await?;
    app.renderer().render_status(&status, args.channel)?;
    Ok(ExitCode::SUCCESS)
}
