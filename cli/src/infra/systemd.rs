//! systemd implementation of the `ServiceManager` port.
//!
//! Loading copies the packaged unit file into the systemd directory; every
//! other action goes through `systemctl`. Actions on units that are already
//! stopped, disabled or absent succeed.

use std::io::ErrorKind;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ServiceManager};
use crate::domain::UnitState;
use crate::infra::command_runner::ensure_success;
use crate::infra::host::LinuxHost;

/// `systemctl` exit code for "unit not loaded".
const EXIT_UNIT_NOT_LOADED: i32 = 5;

impl<R: CommandRunner> LinuxHost<R> {
    async fn systemctl(&self, args: &[&str]) -> Result<std::process::Output> {
        self.runner.run(&self.systemctl, args).await
    }

    async fn systemctl_checked(&self, args: &[&str]) -> Result<()> {
        let output = self.systemctl(args).await?;
        ensure_success(&output, &format!("systemctl {}", args.join(" ")))
    }

    async fn unit_file_exists(&self, unit: &str) -> Result<bool> {
        let path = self.unit_path(unit)?;
        tokio::task::spawn_blocking(move || path.try_exists())
            .await
            .context("unit lookup task panicked")?
            .context("checking unit file")
    }
}

impl<R: CommandRunner> ServiceManager for LinuxHost<R> {
    async fn load_unit(&self, unit: &str) -> Result<()> {
        let src = self.unit_source(unit)?;
        let dst = self.unit_path(unit)?;
        tracing::debug!(unit, src = %src.display(), dst = %dst.display(), "loading unit");
        tokio::task::spawn_blocking(move || {
            if let Some(parent) = dst.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating directory {}", parent.display()))?;
            }
            std::fs::copy(&src, &dst)
                .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(&dst, std::fs::Permissions::from_mode(0o644))
                    .with_context(|| format!("setting permissions on {}", dst.display()))?;
            }
            Ok::<(), anyhow::Error>(())
        })
        .await
        .context("unit copy task panicked")?
    }

    async fn enable_unit(&self, unit: &str) -> Result<()> {
        self.systemctl_checked(&["enable", unit]).await
    }

    async fn start_unit(&self, unit: &str) -> Result<()> {
        self.systemctl_checked(&["start", unit, "--no-block"]).await
    }

    async fn stop_unit(&self, unit: &str) -> Result<()> {
        let output = self.systemctl(&["stop", unit, "--no-block"]).await?;
        if output.status.code() == Some(EXIT_UNIT_NOT_LOADED) {
            tracing::debug!(unit, "unit not loaded, nothing to stop");
            return Ok(());
        }
        ensure_success(&output, &format!("systemctl stop {unit}"))
    }

    async fn disable_unit(&self, unit: &str) -> Result<()> {
        if !self.unit_file_exists(unit).await? {
            tracing::debug!(unit, "unit file absent, nothing to disable");
            return Ok(());
        }
        self.systemctl_checked(&["disable", unit]).await
    }

    async fn remove_unit(&self, unit: &str) -> Result<()> {
        let path = self.unit_path(unit)?;
        tokio::task::spawn_blocking(move || match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
        })
        .await
        .context("unit removal task panicked")?
    }

    async fn reload(&self) -> Result<()> {
        self.systemctl_checked(&["daemon-reload"]).await
    }

    async fn unit_state(&self, unit: &str) -> Result<UnitState> {
        if !self.unit_file_exists(unit).await? {
            return Ok(UnitState::Absent);
        }
        if self.systemctl(&["is-active", "--quiet", unit]).await?.status.success() {
            return Ok(UnitState::Running);
        }
        if self.systemctl(&["is-enabled", "--quiet", unit]).await?.status.success() {
            return Ok(UnitState::Enabled);
        }
        Ok(UnitState::Loaded)
    }
}
