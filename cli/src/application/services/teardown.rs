//! Application service: agent removal use-case.
//!
//! Also the rollback path of a failed setup, so every step must succeed on a
//! host in any partially-installed state.

use tokio_util::sync::CancellationToken;

use super::unit_ops::{apply, apply_all, checkpoint};
use crate::application::ports::{AgentLink, InstallInfoStore, InstallerHost, ProgressReporter};
use crate::domain::{InstallerError, Unit, UnitAction, UnitSet};

/// Stop and remove every unit of both channels, then the host artifacts.
///
/// Experimental units are stopped before any stable unit: an experimental
/// unit may restart its stable counterpart when it exits, which would bring
/// back a unit that was already stopped.
///
/// # Errors
///
/// Returns the first failure, wrapped with the unit name and action for
/// unit steps. Units after the failing one are left untouched. The
/// install-info removal has no failure path.
pub async fn remove_agent(
    host: &impl InstallerHost,
    units: &UnitSet,
    reporter: &impl ProgressReporter,
    cancel: &CancellationToken,
) -> Result<(), InstallerError> {
    reporter.step("stopping units...");
    apply_all(host, UnitAction::Stop, units.experimental(), cancel).await?;
    apply_all(host, UnitAction::Stop, units.stable(), cancel).await?;

    reporter.step("removing units...");
    purge(host, units.experimental(), cancel).await?;
    purge(host, units.stable(), cancel).await?;

    checkpoint(cancel, "agent symlink removal")?;
    AgentLink::remove(host)
        .await
        .map_err(|source| InstallerError::RemoveSymlink { source: source.into() })?;

    checkpoint(cancel, "install info removal")?;
    InstallInfoStore::remove(host).await;

    tracing::info!("agent removed");
    reporter.success("agent removed");
    Ok(())
}

/// Disable then remove each unit in turn.
async fn purge(
    host: &impl InstallerHost,
    units: &[Unit],
    cancel: &CancellationToken,
) -> Result<(), InstallerError> {
    for unit in units {
        apply(host, UnitAction::Disable, unit, cancel).await?;
        apply(host, UnitAction::Remove, unit, cancel).await?;
    }
    Ok(())
}
