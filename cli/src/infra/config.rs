//! Infrastructure implementation of the `ConfigStore` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::InstallerConfig;

/// Environment variable overriding the configuration path.
pub const CONFIG_ENV: &str = "AGENT_INSTALLER_CONFIG";

/// System-wide configuration location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/datadog-agent/installer.yaml";

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
///
/// Path resolution: explicit path, then `AGENT_INSTALLER_CONFIG`, then
/// [`DEFAULT_CONFIG_PATH`]. A missing file yields the defaults.
#[derive(Debug, Default)]
pub struct YamlConfigStore {
    explicit: Option<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<InstallerConfig> {
        let path = self.path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(InstallerConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config: InstallerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    fn path(&self) -> PathBuf {
        if let Some(path) = &self.explicit {
            return path.clone();
        }
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(val);
        }
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }
}
