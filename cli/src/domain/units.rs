//! Unit registry: the ordered stable and experimental unit sequences.
//!
//! Pure data and validation; no I/O.

use std::collections::HashSet;
use std::fmt;

use installer_common::{Channel, Subcomponent};
use serde::Serialize;

use crate::domain::error::RegistryError;

/// One systemd unit the installer controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    name: String,
    channel: Channel,
    subcomponent: Subcomponent,
}

impl Unit {
    #[must_use]
    pub fn new(name: impl Into<String>, channel: Channel, subcomponent: Subcomponent) -> Self {
        Self {
            name: name.into(),
            channel,
            subcomponent,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    #[must_use]
    pub fn subcomponent(&self) -> Subcomponent {
        self.subcomponent
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Stable and experimental units, one per subcomponent on each channel.
///
/// The two sequences are isomorphic: position `i` holds the same
/// subcomponent on both channels. Sequence order is start order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSet {
    stable: Vec<Unit>,
    experimental: Vec<Unit>,
    main_index: usize,
}

impl UnitSet {
    /// Build a unit set from explicit sequences.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] if the sequences are empty, differ in
    /// length or order, carry the wrong channel, repeat a subcomponent or a
    /// unit name, or lack the main subcomponent.
    pub fn new(stable: Vec<Unit>, experimental: Vec<Unit>) -> Result<Self, RegistryError> {
        if stable.is_empty() && experimental.is_empty() {
            return Err(RegistryError::Empty);
        }
        if stable.len() != experimental.len() {
            return Err(RegistryError::LengthMismatch {
                stable: stable.len(),
                experimental: experimental.len(),
            });
        }
        check_channel(&stable, Channel::Stable)?;
        check_channel(&experimental, Channel::Experimental)?;

        let mut seen = HashSet::new();
        for (index, (s, e)) in stable.iter().zip(&experimental).enumerate() {
            if s.subcomponent != e.subcomponent {
                return Err(RegistryError::Misaligned {
                    index,
                    stable: s.subcomponent,
                    experimental: e.subcomponent,
                });
            }
            if !seen.insert(s.subcomponent) {
                return Err(RegistryError::DuplicateSubcomponent(s.subcomponent));
            }
        }

        let mut names = HashSet::new();
        for unit in stable.iter().chain(&experimental) {
            if !names.insert(unit.name.as_str()) {
                return Err(RegistryError::DuplicateName(unit.name.clone()));
            }
        }

        let main_index = stable
            .iter()
            .position(|u| u.subcomponent == Subcomponent::Main)
            .ok_or(RegistryError::MissingMain)?;

        Ok(Self {
            stable,
            experimental,
            main_index,
        })
    }

    /// Derive unit names from a prefix, e.g. `datadog-agent` gives
    /// `datadog-agent.service` and `datadog-agent-exp.service` for `Main`.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] if `subcomponents` is empty, repeats an
    /// entry, or lacks `Main`.
    pub fn from_prefix(prefix: &str, subcomponents: &[Subcomponent]) -> Result<Self, RegistryError> {
        let build = |channel| {
            subcomponents
                .iter()
                .map(|&sub| Unit::new(sub.unit_name(prefix, channel), channel, sub))
                .collect::<Vec<_>>()
        };
        Self::new(build(Channel::Stable), build(Channel::Experimental))
    }

    #[must_use]
    pub fn stable(&self) -> &[Unit] {
        &self.stable
    }

    #[must_use]
    pub fn experimental(&self) -> &[Unit] {
        &self.experimental
    }

    #[must_use]
    pub fn units(&self, channel: Channel) -> &[Unit] {
        match channel {
            Channel::Stable => &self.stable,
            Channel::Experimental => &self.experimental,
        }
    }

    /// The main agent unit on the given channel.
    #[must_use]
    pub fn main(&self, channel: Channel) -> &Unit {
        &self.units(channel)[self.main_index]
    }

    /// Every unit, stable sequence first.
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.stable.iter().chain(&self.experimental)
    }

    /// Number of units across both channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stable.len() + self.experimental.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stable.is_empty()
    }
}

fn check_channel(units: &[Unit], expected: Channel) -> Result<(), RegistryError> {
    match units.iter().find(|u| u.channel != expected) {
        Some(u) => Err(RegistryError::WrongChannel {
            unit: u.name.clone(),
            expected,
            actual: u.channel,
        }),
        None => Ok(()),
    }
}
