//! Domain types and validators for installer configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use installer_common::Subcomponent;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::units::UnitSet;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `/etc/datadog-agent/installer.yaml`.
///
/// Every field has a default, so an absent file means a stock install.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct InstallerConfig {
    pub units: UnitsConfig,
    pub identity: IdentityConfig,
    pub paths: PathsConfig,
    pub helper: HelperConfig,
    pub commands: CommandsConfig,
}

/// Which units exist and how they are named.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UnitsConfig {
    /// Unit name stem, e.g. `datadog-agent` for `datadog-agent.service`.
    pub prefix: String,
    /// Subcomponents in start order. Must include `main`.
    pub subcomponents: Vec<Subcomponent>,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            prefix: "datadog-agent".to_string(),
            subcomponents: Subcomponent::ALL.to_vec(),
        }
    }
}

/// The installer user and the group the agent units run under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IdentityConfig {
    pub installer_user: String,
    pub agent_group: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            installer_user: "dd-installer".to_string(),
            agent_group: "dd-agent".to_string(),
        }
    }
}

/// Host filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory the packaged unit files are copied from.
    pub unit_source_dir: PathBuf,
    /// Directory systemd loads unit files from.
    pub systemd_dir: PathBuf,
    /// "Current version" symlink.
    pub agent_symlink: PathBuf,
    /// Target of the symlink.
    pub agent_binary: PathBuf,
    /// Install-info marker file.
    pub install_info: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            unit_source_dir: PathBuf::from("/opt/datadog-packages/datadog-installer/stable/systemd"),
            systemd_dir: PathBuf::from("/etc/systemd/system"),
            agent_symlink: PathBuf::from("/usr/bin/datadog-agent"),
            agent_binary: PathBuf::from("/opt/datadog-packages/datadog-agent/stable/bin/agent/agent"),
            install_info: PathBuf::from("/etc/datadog-agent/install_info"),
        }
    }
}

/// Privileged helper used for actions the installer user cannot perform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HelperConfig {
    pub path: PathBuf,
    /// Run the helper through `sudo -n`.
    pub sudo: bool,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/opt/datadog-packages/datadog-installer/stable/bin/installer/helper"),
            sudo: true,
        }
    }
}

/// External command settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommandsConfig {
    /// Per-command timeout in seconds.
    pub timeout_secs: u64,
    /// `systemctl` executable.
    pub systemctl: String,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            systemctl: "systemctl".to_string(),
        }
    }
}

impl InstallerConfig {
    /// Check every value and build the unit registry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for blank names, relative paths or a zero
    /// timeout, and a `RegistryError` if the subcomponent list does not
    /// form a valid unit set.
    pub fn unit_set(&self) -> Result<UnitSet> {
        self.validate()?;
        Ok(UnitSet::from_prefix(&self.units.prefix, &self.units.subcomponents)?)
    }

    /// # Errors
    ///
    /// Returns the first invalid value as a [`ConfigError`].
    pub fn validate(&self) -> Result<()> {
        validate_name("units.prefix", &self.units.prefix)?;
        validate_name("identity.installer_user", &self.identity.installer_user)?;
        validate_name("identity.agent_group", &self.identity.agent_group)?;
        validate_name("commands.systemctl", &self.commands.systemctl)?;
        for (key, path) in [
            ("paths.unit_source_dir", &self.paths.unit_source_dir),
            ("paths.systemd_dir", &self.paths.systemd_dir),
            ("paths.agent_symlink", &self.paths.agent_symlink),
            ("paths.agent_binary", &self.paths.agent_binary),
            ("paths.install_info", &self.paths.install_info),
            ("helper.path", &self.helper.path),
        ] {
            validate_absolute(key, path)?;
        }
        if self.commands.timeout_secs == 0 {
            return Err(invalid("commands.timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }

    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.commands.timeout_secs)
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

fn invalid(key: &str, reason: &str) -> anyhow::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

fn validate_name(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(key, "must not be empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(invalid(key, "must not contain whitespace"));
    }
    Ok(())
}

fn validate_absolute(key: &str, path: &Path) -> Result<()> {
    if !path.is_absolute() {
        return Err(invalid(key, "must be an absolute path"));
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
