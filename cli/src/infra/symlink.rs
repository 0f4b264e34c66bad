//! The agent "current version" symlink.
//!
//! Creation is atomic: a temporary link is created beside the final path and
//! renamed over it, so the link never points nowhere mid-update.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{AgentLink, CommandRunner};
use crate::infra::host::LinuxHost;

fn create_sync(link: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = link.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let temp = link.with_extension("tmp-link");
    match std::fs::remove_file(&temp) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e).with_context(|| format!("clearing {}", temp.display())),
    }
    std::os::unix::fs::symlink(target, &temp)
        .with_context(|| format!("linking {} -> {}", temp.display(), target.display()))?;
    std::fs::rename(&temp, link)
        .with_context(|| format!("finalizing symlink {}", link.display()))
}

fn remove_sync(link: &Path) -> Result<()> {
    match std::fs::remove_file(link) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("removing symlink {}", link.display())),
    }
}

fn target_sync(link: &Path) -> Result<Option<PathBuf>> {
    match std::fs::read_link(link) {
        Ok(target) => Ok(Some(target)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading symlink {}", link.display())),
    }
}

impl<R: CommandRunner> AgentLink for LinuxHost<R> {
    async fn create(&self) -> Result<()> {
        let link = self.paths.agent_symlink.clone();
        let target = self.paths.agent_binary.clone();
        tracing::debug!(link = %link.display(), target = %target.display(), "creating agent symlink");
        tokio::task::spawn_blocking(move || create_sync(&link, &target))
            .await
            .context("symlink task panicked")?
    }

    async fn remove(&self) -> Result<()> {
        let link = self.paths.agent_symlink.clone();
        tokio::task::spawn_blocking(move || remove_sync(&link))
            .await
            .context("symlink task panicked")?
    }

    async fn target(&self) -> Result<Option<PathBuf>> {
        let link = self.paths.agent_symlink.clone();
        tokio::task::spawn_blocking(move || target_sync(&link))
            .await
            .context("symlink task panicked")?
    }
}
