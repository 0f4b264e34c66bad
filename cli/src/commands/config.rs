//! `agent-installer config`: show the effective configuration.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;

/// Run the config command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    app.renderer()
        .render_config(&app.config, &app.config_store.path())?;
    Ok(ExitCode::SUCCESS)
}
