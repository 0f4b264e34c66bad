use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Package type recorded by installer-driven installs.
pub const INSTALL_PACKAGE_TYPE: &str = "installer_package";

/// Update method recorded by installer-driven installs.
pub const INSTALL_UPDATE_METHOD: &str = "manual_update";

/// Install marker persisted once setup completes.
///
/// The agent reads this file to report how it was installed, so the layout
/// must stay stable:
///
/// ```yaml
/// install_method:
///   tool: installer_package
///   tool_version: manual_update
///   installer_version: 0.1.0
///   installed_at: 2026-10-18T12:00:00Z
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstallInfo {
    pub install_method: InstallMethod,
}

/// Body of the `install_method` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstallMethod {
    /// Package type, e.g. `installer_package`.
    pub tool: String,
    /// Update method, e.g. `manual_update`.
    pub tool_version: String,
    /// Version of the installer that wrote the marker.
    pub installer_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_at: Option<DateTime<Utc>>,
}

impl InstallInfo {
    /// Marker for an installer-driven install, stamped with the current time.
    #[must_use]
    pub fn installer_package(installer_version: &str) -> Self {
        Self::new(
            INSTALL_PACKAGE_TYPE,
            INSTALL_UPDATE_METHOD,
            installer_version,
            Some(Utc::now()),
        )
    }

    #[must_use]
    pub fn new(
        package_type: &str,
        update_method: &str,
        installer_version: &str,
        installed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            install_method: InstallMethod {
                tool: package_type.to_string(),
                tool_version: update_method.to_string(),
                installer_version: installer_version.to_string(),
                installed_at,
            },
        }
    }

    #[must_use]
    pub fn package_type(&self) -> &str {
        &self.install_method.tool
    }

    #[must_use]
    pub fn update_method(&self) -> &str {
        &self.install_method.tool_version
    }

    /// Whether this marker was written by an installer-driven install.
    #[must_use]
    pub fn is_installer_package(&self) -> bool {
        self.package_type() == INSTALL_PACKAGE_TYPE && self.update_method() == INSTALL_UPDATE_METHOD
    }
}
