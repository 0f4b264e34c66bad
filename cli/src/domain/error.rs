//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! Port failures arrive as `anyhow::Error` and are boxed into the `source`
//! of the variant that names the failed step.

use std::fmt;

use installer_common::{Channel, Subcomponent};
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ── Unit actions ──────────────────────────────────────────────────────────────

/// Per-unit operation issued to the service manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitAction {
    Load,
    Enable,
    Start,
    Stop,
    Disable,
    Remove,
}

impl fmt::Display for UnitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Load => "load",
            Self::Enable => "enable",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Disable => "disable",
            Self::Remove => "remove",
        })
    }
}

// ── Orchestration errors ──────────────────────────────────────────────────────

/// Coarse failure class, stable across repeated runs of the same failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Precondition,
    UnitOperation,
    Reload,
    Artifact,
    Cancelled,
}

impl ErrorClass {
    /// Machine-readable code used in `--json` error objects.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Precondition => "precondition_failed",
            Self::UnitOperation => "unit_operation_failed",
            Self::Reload => "reload_failed",
            Self::Artifact => "artifact_failed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Failure of a single orchestration step.
#[derive(Debug, Error)]
pub enum InstallerError {
    #[error("failed to query groups of '{user}'")]
    GroupQuery {
        user: String,
        #[source]
        source: BoxError,
    },

    #[error("helper command '{command}' failed")]
    Helper {
        command: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to {action} {unit}")]
    UnitOperation {
        action: UnitAction,
        unit: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to reload service manager configuration")]
    Reload {
        #[source]
        source: BoxError,
    },

    #[error("failed to create agent symlink")]
    CreateSymlink {
        #[source]
        source: BoxError,
    },

    #[error("failed to remove agent symlink")]
    RemoveSymlink {
        #[source]
        source: BoxError,
    },

    #[error("failed to write install info")]
    WriteInstallInfo {
        #[source]
        source: BoxError,
    },

    #[error("cancelled before {step}")]
    Cancelled { step: String },
}

impl InstallerError {
    #[must_use]
    pub fn unit(action: UnitAction, unit: &str, source: anyhow::Error) -> Self {
        Self::UnitOperation {
            action,
            unit: unit.to_string(),
            source: source.into(),
        }
    }

    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::GroupQuery { .. } | Self::Helper { .. } => ErrorClass::Precondition,
            Self::UnitOperation { .. } => ErrorClass::UnitOperation,
            Self::Reload { .. } => ErrorClass::Reload,
            Self::CreateSymlink { .. }
            | Self::RemoveSymlink { .. }
            | Self::WriteInstallInfo { .. } => ErrorClass::Artifact,
            Self::Cancelled { .. } => ErrorClass::Cancelled,
        }
    }

    /// Unit name and action for unit-operation failures.
    #[must_use]
    pub fn unit_operation(&self) -> Option<(&str, UnitAction)> {
        match self {
            Self::UnitOperation { action, unit, .. } => Some((unit.as_str(), *action)),
            _ => None,
        }
    }
}

/// Failed setup: the step that failed, plus the rollback failure if the
/// compensating teardown did not complete either.
#[derive(Debug, Error)]
#[error("agent setup failed{}", rollback_note(.rollback.as_ref()))]
pub struct SetupError {
    #[source]
    pub primary: InstallerError,
    pub rollback: Option<InstallerError>,
}

impl SetupError {
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        self.primary.class()
    }

    /// True when rollback failed and the host may be partially installed.
    #[must_use]
    pub fn host_inconsistent(&self) -> bool {
        self.rollback.is_some()
    }
}

fn rollback_note(rollback: Option<&InstallerError>) -> String {
    rollback.map_or_else(String::new, |err| {
        format!(" (rollback also failed: {})", error_chain(err))
    })
}

/// Render an error and its sources as `outer: inner: root`.
#[must_use]
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

// ── Registry errors ───────────────────────────────────────────────────────────

/// A unit set that breaks the stable/experimental isomorphism.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unit set is empty")]
    Empty,

    #[error("stable and experimental sets differ in length ({stable} vs {experimental})")]
    LengthMismatch { stable: usize, experimental: usize },

    #[error("unit '{unit}' is listed as {expected} but declared {actual}")]
    WrongChannel {
        unit: String,
        expected: Channel,
        actual: Channel,
    },

    #[error(
        "position {index}: stable unit is '{stable}' but experimental unit is '{experimental}'"
    )]
    Misaligned {
        index: usize,
        stable: Subcomponent,
        experimental: Subcomponent,
    },

    #[error("subcomponent '{0}' is declared more than once")]
    DuplicateSubcomponent(Subcomponent),

    #[error("unit name '{0}' is used more than once")]
    DuplicateName(String),

    #[error("unit set has no main subcomponent")]
    MissingMain,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to installer configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
