//! Group lookup and privileged helper execution for `LinuxHost`.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, GroupMembership, HelperCommand, HelperExecutor};
use crate::infra::command_runner::ensure_success;
use crate::infra::host::LinuxHost;

impl<R: CommandRunner> GroupMembership for LinuxHost<R> {
    async fn groups_of(&self, user: &str) -> Result<String> {
        let output = self.runner.run("id", &["-Gn", user]).await?;
        ensure_success(&output, &format!("id -Gn {user}"))?;
        let groups = String::from_utf8(output.stdout).context("group list is not UTF-8")?;
        Ok(groups.trim().to_string())
    }
}

impl<R: CommandRunner> HelperExecutor for LinuxHost<R> {
    async fn execute(&self, command: HelperCommand) -> Result<()> {
        let helper = self
            .helper
            .path
            .to_str()
            .with_context(|| format!("helper path {} is not UTF-8", self.helper.path.display()))?;

        let output = if self.helper.sudo {
            self.runner.run("sudo", &["-n", helper, command.as_str()]).await?
        } else {
            self.runner.run(helper, &[command.as_str()]).await?
        };
        ensure_success(&output, &format!("helper {command}"))
    }
}
