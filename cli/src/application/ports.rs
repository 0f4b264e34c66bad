//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `installer-common`,
//! never from `crate::infra`, `crate::commands`, or `crate::output`.

use std::fmt;
use std::path::PathBuf;
use std::process::Output;

use anyhow::Result;
use installer_common::InstallInfo;

use crate::domain::{InstallerConfig, UnitState};

// ── Service Manager Port ──────────────────────────────────────────────────────

/// Per-unit operations on the host service manager.
///
/// Every mutating method is idempotent: loading a loaded unit, enabling an
/// enabled unit, stopping a stopped unit, or disabling/removing an absent
/// unit all succeed.
#[allow(async_fn_in_trait)]
pub trait ServiceManager {
    /// Install the unit file so the service manager can see it.
    async fn load_unit(&self, unit: &str) -> Result<()>;
    async fn enable_unit(&self, unit: &str) -> Result<()>;
    async fn start_unit(&self, unit: &str) -> Result<()>;
    async fn stop_unit(&self, unit: &str) -> Result<()>;
    async fn disable_unit(&self, unit: &str) -> Result<()>;
    /// Delete the unit file.
    async fn remove_unit(&self, unit: &str) -> Result<()>;
    /// Reload service manager configuration after unit files changed.
    async fn reload(&self) -> Result<()>;
    /// Observe where a unit sits in its lifecycle.
    async fn unit_state(&self, unit: &str) -> Result<UnitState>;
}

// ── Identity Ports ────────────────────────────────────────────────────────────

/// Group membership lookup for a local user.
#[allow(async_fn_in_trait)]
pub trait GroupMembership {
    /// Return the raw, whitespace-separated group list of `user`.
    async fn groups_of(&self, user: &str) -> Result<String>;
}

/// Privileged actions run out-of-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperCommand {
    AddInstallerToAgentGroup,
}

impl HelperCommand {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddInstallerToAgentGroup => "add-installer-to-agent-group",
        }
    }
}

impl fmt::Display for HelperCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs privileged helper commands.
#[allow(async_fn_in_trait)]
pub trait HelperExecutor {
    async fn execute(&self, command: HelperCommand) -> Result<()>;
}

// ── Artifact Ports ────────────────────────────────────────────────────────────

/// The "current version" symlink pointing at the agent binary.
#[allow(async_fn_in_trait)]
pub trait AgentLink {
    /// Create the link, replacing any existing one.
    async fn create(&self) -> Result<()>;
    /// Remove the link. A missing link is not an error.
    async fn remove(&self) -> Result<()>;
    /// Current link target, `None` when no link exists.
    async fn target(&self) -> Result<Option<PathBuf>>;
}

/// Persistence for the install-info marker.
#[allow(async_fn_in_trait)]
pub trait InstallInfoStore {
    async fn write(&self, info: &InstallInfo) -> Result<()>;
    /// Best-effort removal; failures are logged, never returned.
    async fn remove(&self);
    async fn read(&self) -> Result<Option<InstallInfo>>;
}

/// Composite trait: everything the orchestrators touch on the host.
pub trait InstallerHost:
    ServiceManager + GroupMembership + HelperExecutor + AgentLink + InstallInfoStore
{
}

/// Blanket implementation: any type implementing all five sub-traits is an `InstallerHost`.
impl<T> InstallerHost for T where
    T: ServiceManager + GroupMembership + HelperExecutor + AgentLink + InstallInfoStore
{
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Loads installer configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when none exists.
    fn load(&self) -> Result<InstallerConfig>;
    /// Location the configuration is read from.
    fn path(&self) -> PathBuf;
}
