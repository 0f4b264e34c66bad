//! Step helpers shared by the orchestrators.
//!
//! Every port call goes through [`checkpoint`] first, so cancellation is
//! observed between steps and never in the middle of one.

use tokio_util::sync::CancellationToken;

use crate::application::ports::ServiceManager;
use crate::domain::{InstallerError, Unit, UnitAction};

/// Fail with `Cancelled` if the token fired before `step` started.
pub(crate) fn checkpoint(cancel: &CancellationToken, step: &str) -> Result<(), InstallerError> {
    if cancel.is_cancelled() {
        tracing::warn!(step, "cancelled, step not started");
        return Err(InstallerError::Cancelled {
            step: step.to_string(),
        });
    }
    Ok(())
}

/// Apply one action to one unit, wrapping any failure with unit and action.
pub(crate) async fn apply(
    manager: &impl ServiceManager,
    action: UnitAction,
    unit: &Unit,
    cancel: &CancellationToken,
) -> Result<(), InstallerError> {
    let name = unit.name();
    checkpoint(cancel, &format!("{action} {name}"))?;
    tracing::debug!(unit = name, %action, channel = %unit.channel(), "unit action");
    let result = match action {
        UnitAction::Load => manager.load_unit(name).await,
        UnitAction::Enable => manager.enable_unit(name).await,
        UnitAction::Start => manager.start_unit(name).await,
        UnitAction::Stop => manager.stop_unit(name).await,
        UnitAction::Disable => manager.disable_unit(name).await,
        UnitAction::Remove => manager.remove_unit(name).await,
    };
    result.map_err(|source| InstallerError::unit(action, name, source))
}

/// Apply `action` to each unit in order, stopping at the first failure.
pub(crate) async fn apply_all(
    manager: &impl ServiceManager,
    action: UnitAction,
    units: &[Unit],
    cancel: &CancellationToken,
) -> Result<(), InstallerError> {
    for unit in units {
        apply(manager, action, unit, cancel).await?;
    }
    Ok(())
}
