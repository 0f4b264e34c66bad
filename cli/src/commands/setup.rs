//! `agent-installer setup`: install and start the stable agent.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::setup::{SetupOptions, setup_agent};
use crate::output::JsonRenderer;

/// Run the setup command.
///
/// # Errors
///
/// Returns the setup failure. When rollback also failed the host may be
/// partially installed and the user is told how to clean it up.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let reporter = app.reporter();
    let opts = SetupOptions {
        reporter: &reporter,
        identity: &app.config.identity,
        installer_version: env!("CARGO_PKG_VERSION"),
    };

    if let Err(err) = setup_agent(&app.host, &app.units, opts, &app.cancel).await {
        if err.host_inconsistent() && !app.is_json() {
            app.output
                .error("cleanup after the failed setup did not complete; run `agent-installer remove`");
        }
        return Err(err.into());
    }

    if app.is_json() {
        JsonRenderer.render_done("setup")?;
    }
    Ok(ExitCode::SUCCESS)
}
