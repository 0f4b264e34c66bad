//! `LinuxHost`: the production `InstallerHost`.
//!
//! The port implementations live next to the concern they cover:
//! `systemd.rs` (`ServiceManager`), `identity.rs` (`GroupMembership`,
//! `HelperExecutor`), `symlink.rs` (`AgentLink`) and `install_info.rs`
//! (`InstallInfoStore`).

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::CommandRunner;
use crate::domain::config::{HelperConfig, InstallerConfig, PathsConfig};
use crate::infra::command_runner::TokioCommandRunner;

/// Host adapter backed by systemd, local commands and the filesystem.
pub struct LinuxHost<R: CommandRunner> {
    pub(crate) runner: R,
    pub(crate) paths: PathsConfig,
    pub(crate) helper: HelperConfig,
    pub(crate) systemctl: String,
}

impl<R: CommandRunner> LinuxHost<R> {
    #[must_use]
    pub fn new(runner: R, config: &InstallerConfig) -> Self {
        Self {
            runner,
            paths: config.paths.clone(),
            helper: config.helper.clone(),
            systemctl: config.commands.systemctl.clone(),
        }
    }

    /// Path of an installed unit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit name could escape the systemd directory.
    pub(crate) fn unit_path(&self, unit: &str) -> Result<PathBuf> {
        validate_unit_name(unit)?;
        Ok(self.paths.systemd_dir.join(unit))
    }

    /// Path of a packaged unit file.
    pub(crate) fn unit_source(&self, unit: &str) -> Result<PathBuf> {
        validate_unit_name(unit)?;
        Ok(self.paths.unit_source_dir.join(unit))
    }
}

impl LinuxHost<TokioCommandRunner> {
    /// Host using the tokio runner with the configured command timeout.
    #[must_use]
    pub fn from_config(config: &InstallerConfig) -> Self {
        Self::new(TokioCommandRunner::new(config.command_timeout()), config)
    }
}

fn validate_unit_name(unit: &str) -> Result<()> {
    anyhow::ensure!(
        !unit.is_empty() && !unit.contains('/') && unit != "." && unit != "..",
        "invalid unit name '{unit}'"
    );
    Ok(())
}
