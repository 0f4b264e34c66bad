//! JSON output helpers.
//!
//! `JsonRenderer` prints machine-readable documents for `--json`, and
//! `format_error` builds the error object every failing `--json` path emits.

use anyhow::{Context, Result};
use installer_common::Channel;
use serde::Serialize;

use crate::domain::{InstallStatus, InstallerConfig, InstallerError, SetupError};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stable code for a failed command, derived from the typed error in the chain.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<SetupError>() {
        return e.class().code();
    }
    if let Some(e) = err.downcast_ref::<InstallerError>() {
        return e.class().code();
    }
    "error"
}

/// Renders domain types as pretty-printed JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_status(&self, status: &InstallStatus, channel: Option<Channel>) -> Result<()> {
        let units: Vec<_> = status
            .units
            .iter()
            .filter(|u| channel.is_none_or(|c| u.channel == c))
            .collect();
        print_json(&serde_json::json!({
            "installed": status.is_installed(),
            "absent": status.is_absent(),
            "experiment_running": status.experiment_running(),
            "units": units,
            "symlink_target": status.symlink_target,
            "install_info": status.install_info,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(&self, config: &InstallerConfig, path: &std::path::Path) -> Result<()> {
        print_json(&serde_json::json!({
            "path": path,
            "config": config,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_done(&self, action: &str) -> Result<()> {
        print_json(&serde_json::json!({ "success": true, "action": action }))
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{text}");
    Ok(())
}
