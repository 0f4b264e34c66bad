//! Install-info marker persistence.
//!
//! The marker is written atomically (temp file + rename) as YAML, mode 0644,
//! so the agent can read it without elevated privileges.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use installer_common::InstallInfo;

use crate::application::ports::{CommandRunner, InstallInfoStore};
use crate::infra::host::LinuxHost;

fn write_sync(path: &Path, info: &InstallInfo) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let content = serde_yaml::to_string(info).context("serializing install info")?;

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, &content)
        .with_context(|| format!("writing temp file {}", temp_path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o644))
            .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
    }

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("finalizing install info {}", path.display()))
}

fn read_sync(path: &Path) -> Result<Option<InstallInfo>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    serde_yaml::from_str(&content)
        .map(Some)
        .with_context(|| format!("parsing {}", path.display()))
}

impl<R: CommandRunner> InstallInfoStore for LinuxHost<R> {
    async fn write(&self, info: &InstallInfo) -> Result<()> {
        let path = self.paths.install_info.clone();
        let info = info.clone();
        tokio::task::spawn_blocking(move || write_sync(&path, &info))
            .await
            .context("install info task panicked")?
    }

    async fn remove(&self) {
        let path = self.paths.install_info.clone();
        let result = tokio::task::spawn_blocking(move || std::fs::remove_file(&path)).await;
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {}
            Ok(Err(e)) => tracing::warn!(
                path = %self.paths.install_info.display(),
                error = %e,
                "failed to remove install info"
            ),
            Err(e) => tracing::warn!(error = %e, "install info removal task panicked"),
        }
    }

    async fn read(&self) -> Result<Option<InstallInfo>> {
        let path = self.paths.install_info.clone();
        tokio::task::spawn_blocking(move || read_sync(&path))
            .await
            .context("install info task panicked")?
    }
}
