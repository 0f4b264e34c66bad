//! `agent-installer remove`: uninstall every unit and artifact.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::teardown::remove_agent;
use crate::output::JsonRenderer;

/// Run the remove command.
///
/// # Errors
///
/// Returns the first teardown failure.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    remove_agent(&app.host, &app.units, &app.reporter(), &app.cancel).await?;

    if app.is_json() {
        JsonRenderer.render_done("remove")?;
    }
    Ok(ExitCode::SUCCESS)
}
