//! Shared test helpers for orchestration service tests.
//!
//! `FakeHost` implements every host port, records each call in order and
//! fails any call registered with [`FakeHost::fail_on`].

#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use installer_common::InstallInfo;

use crate::application::ports::{
    AgentLink, GroupMembership, HelperCommand, HelperExecutor, InstallInfoStore,
    ProgressReporter, ServiceManager,
};
use crate::domain::{UnitAction, UnitState};

/// One recorded port call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Groups(String),
    Helper(HelperCommand),
    Unit(UnitAction, String),
    Reload,
    CreateLink,
    RemoveLink,
    WriteInfo,
    RemoveInfo,
}

#[derive(Default)]
struct Inner {
    calls: Vec<Call>,
    failures: Vec<Call>,
    /// Unit name to `(state, enabled)`; a stopped unit falls back to
    /// `Enabled` or `Loaded` depending on the flag.
    units: HashMap<String, (UnitState, bool)>,
    link: bool,
    info: Option<InstallInfo>,
}

pub struct FakeHost {
    groups: String,
    inner: Mutex<Inner>,
}

impl FakeHost {
    /// Host whose installer user already belongs to the agent group.
    pub fn new() -> Self {
        Self::with_groups("dd-installer dd-agent")
    }

    pub fn with_groups(groups: &str) -> Self {
        Self {
            groups: groups.to_string(),
            inner: Mutex::default(),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("lock")
    }

    /// Make every future call equal to `call` fail.
    pub fn fail_on(&self, call: Call) {
        self.inner().failures.push(call);
    }

    pub fn fail_helper(&self) {
        self.fail_on(Call::Helper(HelperCommand::AddInstallerToAgentGroup));
    }

    pub fn fail_group_query(&self) {
        self.fail_on(Call::Groups("dd-installer".to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner().calls.clone()
    }

    /// Unit calls only, as `(action, unit)` pairs.
    pub fn unit_calls(&self) -> Vec<(UnitAction, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Unit(action, unit) => Some((action, unit)),
                _ => None,
            })
            .collect()
    }

    pub fn helper_calls(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, Call::Helper(_))).count()
    }

    pub fn state_of(&self, unit: &str) -> UnitState {
        self.inner().units.get(unit).map_or(UnitState::Absent, |(s, _)| *s)
    }

    pub fn set_state(&self, unit: &str, state: UnitState) {
        let enabled = state == UnitState::Enabled;
        self.inner().units.insert(unit.to_string(), (state, enabled));
    }

    pub fn has_link(&self) -> bool {
        self.inner().link
    }

    pub fn stored_info(&self) -> Option<InstallInfo> {
        self.inner().info.clone()
    }

    fn record(&self, call: Call) -> Result<MutexGuard<'_, Inner>> {
        let mut inner = self.inner();
        inner.calls.push(call.clone());
        if inner.failures.contains(&call) {
            anyhow::bail!("injected failure: {call:?}");
        }
        Ok(inner)
    }

    fn transition(&self, action: UnitAction, unit: &str) -> Result<()> {
        let mut inner = self.record(Call::Unit(action, unit.to_string()))?;
        let (state, enabled) = inner
            .units
            .get(unit)
            .copied()
            .unwrap_or((UnitState::Absent, false));
        let idle = if enabled { UnitState::Enabled } else { UnitState::Loaded };
        let next = match action {
            UnitAction::Load if state == UnitState::Absent => (UnitState::Loaded, false),
            UnitAction::Load => (state, enabled),
            UnitAction::Enable | UnitAction::Start => {
                anyhow::ensure!(state != UnitState::Absent, "unit {unit} not loaded");
                if action == UnitAction::Start {
                    (UnitState::Running, enabled)
                } else {
                    (state.max(UnitState::Enabled), true)
                }
            }
            UnitAction::Stop => (state.min(idle), enabled),
            UnitAction::Disable if state == UnitState::Enabled => (UnitState::Loaded, false),
            UnitAction::Disable => (state, false),
            UnitAction::Remove => (UnitState::Absent, false),
        };
        inner.units.insert(unit.to_string(), next);
        Ok(())
    }
}

impl ServiceManager for FakeHost {
    async fn load_unit(&self, unit: &str) -> Result<()> {
        self.transition(UnitAction::Load, unit)
    }
    async fn enable_unit(&self, unit: &str) -> Result<()> {
        self.transition(UnitAction::Enable, unit)
    }
    async fn start_unit(&self, unit: &str) -> Result<()> {
        self.transition(UnitAction::Start, unit)
    }
    async fn stop_unit(&self, unit: &str) -> Result<()> {
        self.transition(UnitAction::Stop, unit)
    }
    async fn disable_unit(&self, unit: &str) -> Result<()> {
        self.transition(UnitAction::Disable, unit)
    }
    async fn remove_unit(&self, unit: &str) -> Result<()> {
        self.transition(UnitAction::Remove, unit)
    }
    async fn reload(&self) -> Result<()> {
        self.record(Call::Reload).map(drop)
    }
    async fn unit_state(&self, unit: &str) -> Result<UnitState> {
        Ok(self.state_of(unit))
    }
}

impl GroupMembership for FakeHost {
    async fn groups_of(&self, user: &str) -> Result<String> {
        self.record(Call::Groups(user.to_string()))?;
        Ok(self.groups.clone())
    }
}

impl HelperExecutor for FakeHost {
    async fn execute(&self, command: HelperCommand) -> Result<()> {
        self.record(Call::Helper(command)).map(drop)
    }
}

impl AgentLink for FakeHost {
    async fn create(&self) -> Result<()> {
        self.record(Call::CreateLink)?.link = true;
        Ok(())
    }
    async fn remove(&self) -> Result<()> {
        self.record(Call::RemoveLink)?.link = false;
        Ok(())
    }
    async fn target(&self) -> Result<Option<PathBuf>> {
        Ok(self.has_link().then(|| PathBuf::from("/opt/agent/bin/agent")))
    }
}

impl InstallInfoStore for FakeHost {
    async fn write(&self, info: &InstallInfo) -> Result<()> {
        self.record(Call::WriteInfo)?.info = Some(info.clone());
        Ok(())
    }
    async fn remove(&self) {
        if let Ok(mut inner) = self.record(Call::RemoveInfo) {
            inner.info = None;
        }
    }
    async fn read(&self) -> Result<Option<InstallInfo>> {
        Ok(self.stored_info())
    }
}

/// Reporter that prints nothing.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
