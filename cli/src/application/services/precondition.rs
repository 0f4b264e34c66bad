//! Precondition: the installer user must belong to the agent group before
//! any unit is loaded.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use tokio_util::sync::CancellationToken;

use super::unit_ops::checkpoint;
use crate::application::ports::{GroupMembership, HelperCommand, HelperExecutor};
use crate::domain::InstallerError;
use crate::domain::config::IdentityConfig;

/// Whether `group` appears in a whitespace-separated group list.
#[must_use]
pub fn has_group(membership: &str, group: &str) -> bool {
    membership.split_whitespace().any(|g| g == group)
}

/// Add the installer user to the agent group unless it is already a member.
///
/// No helper command is issued when the group is present.
///
/// # Errors
///
/// Returns `GroupQuery` if the membership lookup fails and `Helper` if the
/// privileged helper fails; the helper's own error is kept as the source.
pub async fn ensure_installer_in_agent_group(
    host: &(impl GroupMembership + HelperExecutor),
    identity: &IdentityConfig,
    cancel: &CancellationToken,
) -> Result<(), InstallerError> {
    let user = identity.installer_user.as_str();
    let group = identity.agent_group.as_str();

    checkpoint(cancel, "group query")?;
    let membership = host
        .groups_of(user)
        .await
        .map_err(|source| InstallerError::GroupQuery {
            user: user.to_string(),
            source: source.into(),
        })?;
    if has_group(&membership, group) {
        tracing::debug!(user, group, "installer already in agent group");
        return Ok(());
    }

    let command = HelperCommand::AddInstallerToAgentGroup;
    checkpoint(cancel, command.as_str())?;
    tracing::info!(user, group, "adding installer to agent group");
    host.execute(command)
        .await
        .map_err(|source| InstallerError::Helper {
            command: command.to_string(),
            source: source.into(),
        })
}
