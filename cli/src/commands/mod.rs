//! Command implementations

pub mod config;
pub mod experiment;
pub mod remove;
pub mod setup;
pub mod status;
