//! Observed installed state of the unit set and host artifacts.

use std::fmt;
use std::path::PathBuf;

use installer_common::{Channel, InstallInfo, Subcomponent};
use serde::Serialize;

/// Lifecycle position of one unit as reported by the service manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitState {
    Absent,
    Loaded,
    Enabled,
    Running,
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Absent => "absent",
            Self::Loaded => "loaded",
            Self::Enabled => "enabled",
            Self::Running => "running",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitStatus {
    pub name: String,
    pub channel: Channel,
    pub subcomponent: Subcomponent,
    pub state: UnitState,
}

/// Snapshot produced by the status inspector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallStatus {
    pub units: Vec<UnitStatus>,
    pub symlink_target: Option<PathBuf>,
    pub install_info: Option<InstallInfo>,
}

impl InstallStatus {
    pub fn channel(&self, channel: Channel) -> impl Iterator<Item = &UnitStatus> {
        self.units.iter().filter(move |u| u.channel == channel)
    }

    /// Stable units running, experimental units staged, artifacts present.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.channel(Channel::Stable).all(|u| u.state == UnitState::Running)
            && self.channel(Channel::Experimental).all(|u| u.state == UnitState::Loaded)
            && self.symlink_target.is_some()
            && self.install_info.is_some()
    }

    /// Nothing left on the host.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.units.iter().all(|u| u.state == UnitState::Absent)
            && self.symlink_target.is_none()
            && self.install_info.is_none()
    }

    /// Whether the experimental main unit is running.
    #[must_use]
    pub fn experiment_running(&self) -> bool {
        self.channel(Channel::Experimental)
            .any(|u| u.subcomponent == Subcomponent::Main && u.state == UnitState::Running)
    }
}
