use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rollout channel a unit belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Production variant, enabled and started on install.
    Stable,
    /// Staged variant, loaded but never started on install.
    Experimental,
}

impl Channel {
    /// Suffix appended to the unit stem for this channel.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Stable => "",
            Self::Experimental => "-exp",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stable => "stable",
            Self::Experimental => "experimental",
        })
    }
}

/// Agent subcomponent, one process per unit.
///
/// Declaration order is the default start order: the main agent comes first
/// so the add-ons find it running.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Subcomponent {
    Main,
    Trace,
    Process,
    SystemProbe,
    Security,
}

impl Subcomponent {
    /// All subcomponents in default declaration order.
    pub const ALL: [Self; 5] = [
        Self::Main,
        Self::Trace,
        Self::Process,
        Self::SystemProbe,
        Self::Security,
    ];

    /// Suffix appended to the unit prefix, e.g. `-sysprobe`.
    #[must_use]
    pub fn unit_suffix(self) -> &'static str {
        match self {
            Self::Main => "",
            Self::Trace => "-trace",
            Self::Process => "-process",
            Self::SystemProbe => "-sysprobe",
            Self::Security => "-security",
        }
    }

    /// systemd unit name for this subcomponent on the given channel.
    ///
    /// `unit_name("datadog-agent", Channel::Experimental)` for `Trace` is
    /// `datadog-agent-trace-exp.service`.
    #[must_use]
    pub fn unit_name(self, prefix: &str, channel: Channel) -> String {
        format!("{prefix}{}{}.service", self.unit_suffix(), channel.suffix())
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Trace => "trace",
            Self::Process => "process",
            Self::SystemProbe => "system-probe",
            Self::Security => "security",
        }
    }
}

impl fmt::Display for Subcomponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known subcomponent.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown subcomponent '{0}' (expected one of: main, trace, process, system-probe, security)")]
pub struct ParseSubcomponentError(pub String);

impl FromStr for Subcomponent {
    type Err = ParseSubcomponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseSubcomponentError(s.to_string()))
    }
}
