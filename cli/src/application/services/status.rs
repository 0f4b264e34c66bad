//! Application service: installed-state inspection. Read-only.

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use super::unit_ops::checkpoint;
use crate::application::ports::{AgentLink, InstallInfoStore, ServiceManager};
use crate::domain::{InstallStatus, UnitSet, UnitStatus};

/// Query every unit, stable first, then the symlink and install marker.
///
/// # Errors
///
/// Returns an error if any query fails or the token is cancelled.
pub async fn inspect(
    host: &(impl ServiceManager + AgentLink + InstallInfoStore),
    units: &UnitSet,
    cancel: &CancellationToken,
) -> Result<InstallStatus> {
    let mut statuses = Vec::with_capacity(units.len());
    for unit in units.iter() {
        checkpoint(cancel, &format!("status of {unit}"))?;
        let state = host
            .unit_state(unit.name())
            .await
            .with_context(|| format!("querying state of {unit}"))?;
        statuses.push(UnitStatus {
            name: unit.name().to_string(),
            channel: unit.channel(),
            subcomponent: unit.subcomponent(),
            state,
        });
    }

    let symlink_target = host.target().await.context("reading agent symlink")?;
    let install_info = host.read().await.context("reading install info")?;

    Ok(InstallStatus {
        units: statuses,
        symlink_target,
        install_info,
    })
}
