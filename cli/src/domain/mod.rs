//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod status;
pub mod units;

pub use config::InstallerConfig;
pub use error::{
    ConfigError, ErrorClass, InstallerError, RegistryError, SetupError, UnitAction, error_chain,
};
pub use status::{InstallStatus, UnitState, UnitStatus};
pub use units::{Unit, UnitSet};
