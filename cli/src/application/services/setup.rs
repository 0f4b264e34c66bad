//! Application service: agent setup use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use installer_common::InstallInfo;
use tokio_util::sync::CancellationToken;

use super::precondition::ensure_installer_in_agent_group;
use super::teardown::remove_agent;
use super::unit_ops::{apply_all, checkpoint};
use crate::application::ports::{InstallerHost, ProgressReporter};
use crate::domain::config::IdentityConfig;
use crate::domain::{ErrorClass, InstallerError, SetupError, UnitAction, UnitSet, error_chain};

pub struct SetupOptions<'a, R: ProgressReporter> {
    pub reporter: &'a R,
    pub identity: &'a IdentityConfig,
    /// Recorded in the install-info marker.
    pub installer_version: &'a str,
}

/// Install and start the agent.
///
/// Steps run strictly in order and stop at the first failure:
///
/// 1. ensure the installer user is in the agent group
/// 2. load every stable unit, then every experimental unit
/// 3. reload the service manager once
/// 4. enable, then start, every stable unit
/// 5. create the agent symlink
/// 6. write the install-info marker
///
/// Experimental units are loaded only; they are never enabled or started
/// here. All units are loaded before the reload so the service manager sees
/// the complete unit graph at once.
///
/// # Errors
///
/// On failure the whole unit set is torn down with [`remove_agent`] and a
/// [`SetupError`] is returned carrying the failed step as `primary`. If the
/// teardown fails too, that failure is logged and kept in `rollback`; it
/// never replaces `primary`.
///
/// A failed precondition returns before any unit is touched, so there is
/// nothing to revert and an existing installation is left running.
pub async fn setup_agent(
    host: &impl InstallerHost,
    units: &UnitSet,
    opts: SetupOptions<'_, impl ProgressReporter>,
    cancel: &CancellationToken,
) -> Result<(), SetupError> {
    let reporter = opts.reporter;
    let Err(primary) = run_setup(host, units, &opts, cancel).await else {
        tracing::info!("agent setup complete");
        return Ok(());
    };

    if primary.class() == ErrorClass::Precondition {
        tracing::error!(error = %error_chain(&primary), "agent setup precondition failed");
        return Err(SetupError { primary, rollback: None });
    }

    tracing::error!(error = %error_chain(&primary), "agent setup failed, reverting");
    reporter.warn("setup failed, removing installed units...");
    let rollback = match remove_agent(host, units, reporter, cancel).await {
        Ok(()) => None,
        Err(err) => {
            tracing::warn!(error = %error_chain(&err), "failed to revert agent setup");
            Some(err)
        }
    };
    Err(SetupError { primary, rollback })
}

async fn run_setup(
    host: &impl InstallerHost,
    units: &UnitSet,
    opts: &SetupOptions<'_, impl ProgressReporter>,
    cancel: &CancellationToken,
) -> Result<(), InstallerError> {
    let reporter = opts.reporter;

    // Step 1: Group membership must be in place before any unit is loaded.
    reporter.step("checking installer group membership...");
    ensure_installer_in_agent_group(host, opts.identity, cancel).await?;

    // Step 2: Load both channels, then reload once.
    reporter.step("loading units...");
    apply_all(host, UnitAction::Load, units.stable(), cancel).await?;
    apply_all(host, UnitAction::Load, units.experimental(), cancel).await?;

    checkpoint(cancel, "service manager reload")?;
    host.reload()
        .await
        .map_err(|source| InstallerError::Reload { source: source.into() })?;

    // Step 3: Bring up the stable channel.
    reporter.step("enabling stable units...");
    apply_all(host, UnitAction::Enable, units.stable(), cancel).await?;
    reporter.step("starting stable units...");
    apply_all(host, UnitAction::Start, units.stable(), cancel).await?;

    // Step 4: Artifacts.
    checkpoint(cancel, "agent symlink")?;
    host.create()
        .await
        .map_err(|source| InstallerError::CreateSymlink { source: source.into() })?;

    // Observers treat the marker as install-complete, so it is written last.
    checkpoint(cancel, "install info")?;
    host.write(&InstallInfo::installer_package(opts.installer_version))
        .await
        .map_err(|source| InstallerError::WriteInstallInfo { source: source.into() })?;

    reporter.success("agent installed");
    Ok(())
}
