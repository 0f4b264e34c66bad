//! Application service: experiment start/stop.
//!
//! Only the main agent unit takes part in experiments; add-on units stay on
//! the stable channel.

use installer_common::Channel;
use tokio_util::sync::CancellationToken;

use super::unit_ops::apply;
use crate::application::ports::ServiceManager;
use crate::domain::{InstallerError, UnitAction, UnitSet};

/// Start the experimental main unit.
///
/// # Errors
///
/// Returns a unit-operation error naming the experimental unit.
pub async fn start_agent_experiment(
    manager: &impl ServiceManager,
    units: &UnitSet,
    cancel: &CancellationToken,
) -> Result<(), InstallerError> {
    let unit = units.main(Channel::Experimental);
    tracing::info!(unit = unit.name(), "starting agent experiment");
    apply(manager, UnitAction::Start, unit, cancel).await
}

/// Stop the experimental main unit, then start the stable main unit so the
/// stable agent is running once the experiment ends.
///
/// # Errors
///
/// Returns the first failing step; if stopping the experiment fails the
/// stable unit is not started.
pub async fn stop_agent_experiment(
    manager: &impl ServiceManager,
    units: &UnitSet,
    cancel: &CancellationToken,
) -> Result<(), InstallerError> {
    let experimental = units.main(Channel::Experimental);
    let stable = units.main(Channel::Stable);
    tracing::info!(unit = experimental.name(), "stopping agent experiment");
    apply(manager, UnitAction::Stop, experimental, cancel).await?;
    apply(manager, UnitAction::Start, stable, cancel).await
}
