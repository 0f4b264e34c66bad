//! Shared mock infrastructure for unit tests.
//!
//! [`RecordingHost`] implements every host port, logs each call as a
//! `"<verb> <target>"` line, tracks unit states, and fails calls matching a
//! registered [`Failure`].

#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use agent_installer::application::ports::{
    AgentLink, GroupMembership, HelperCommand, HelperExecutor, InstallInfoStore,
    ProgressReporter, ServiceManager,
};
use agent_installer::domain::{UnitSet, UnitState};
use anyhow::Result;
use installer_common::{InstallInfo, Subcomponent};

pub const AGENT_BINARY: &str = "/opt/datadog-packages/datadog-agent/stable/bin/agent/agent";

pub fn stock_units() -> UnitSet {
    UnitSet::from_prefix("datadog-agent", &Subcomponent::ALL).expect("stock unit set is valid")
}

#[derive(Debug, Clone, Copy, Default)]
struct UnitFlags {
    loaded: bool,
    enabled: bool,
    running: bool,
}

impl UnitFlags {
    fn state(self) -> UnitState {
        if !self.loaded {
            UnitState::Absent
        } else if self.running {
            UnitState::Running
        } else if self.enabled {
            UnitState::Enabled
        } else {
            UnitState::Loaded
        }
    }
}

/// Which call should fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Exact call line, e.g. `"enable datadog-agent-process.service"`.
    Call(String),
    /// The n-th (zero-based) call whose line starts with the verb.
    Nth { verb: &'static str, n: usize },
}

pub struct RecordingHost {
    groups: Mutex<String>,
    log: Mutex<Vec<String>>,
    failures: Mutex<Vec<Failure>>,
    units: Mutex<HashMap<String, UnitFlags>>,
    link: Mutex<Option<PathBuf>>,
    info: Mutex<Option<InstallInfo>>,
}

impl RecordingHost {
    /// Host whose installer user is already in the agent group.
    pub fn new() -> Self {
        Self::with_groups("dd-installer dd-agent")
    }

    pub fn with_groups(groups: &str) -> Self {
        Self {
            groups: Mutex::new(groups.to_string()),
            log: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
            units: Mutex::new(HashMap::new()),
            link: Mutex::new(None),
            info: Mutex::new(None),
        }
    }

    pub fn fail(&self, failure: Failure) {
        self.failures.lock().expect("lock").push(failure);
    }

    pub fn fail_call(&self, line: &str) {
        self.fail(Failure::Call(line.to_string()));
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().expect("lock").clone()
    }

    pub fn clear_log(&self) {
        self.log.lock().expect("lock").clear();
    }

    /// Logged lines starting with `verb`, without the verb.
    pub fn targets_of(&self, verb: &str) -> Vec<String> {
        let prefix = format!("{verb} ");
        self.log()
            .iter()
            .filter_map(|line| line.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    pub fn state(&self, unit: &str) -> UnitState {
        self.units
            .lock()
            .expect("lock")
            .get(unit)
            .copied()
            .unwrap_or_default()
            .state()
    }

    pub fn set_state(&self, unit: &str, state: UnitState) {
        let flags = UnitFlags {
            loaded: state != UnitState::Absent,
            enabled: state >= UnitState::Enabled,
            running: state == UnitState::Running,
        };
        self.units.lock().expect("lock").insert(unit.to_string(), flags);
    }

    pub fn link(&self) -> Option<PathBuf> {
        self.link.lock().expect("lock").clone()
    }

    pub fn info(&self) -> Option<InstallInfo> {
        self.info.lock().expect("lock").clone()
    }

    /// Nothing installed: every unit absent, no link, no marker.
    pub fn is_baseline(&self) -> bool {
        self.units
            .lock()
            .expect("lock")
            .values()
            .all(|u| u.state() == UnitState::Absent)
            && self.link().is_none()
            && self.info().is_none()
    }

    fn record(&self, line: String) -> Result<()> {
        let verb = line.split(' ').next().unwrap_or_default().to_string();
        let seen = self
            .log
            .lock()
            .expect("lock")
            .iter()
            .filter(|l| l.split(' ').next() == Some(verb.as_str()))
            .count();
        self.log.lock().expect("lock").push(line.clone());
        let failing = self.failures.lock().expect("lock").iter().any(|f| match f {
            Failure::Call(l) => *l == line,
            Failure::Nth { verb: v, n } => *v == verb && *n == seen,
        });
        if failing {
            anyhow::bail!("injected failure: {line}");
        }
        Ok(())
    }

    fn update(&self, unit: &str, f: impl FnOnce(&mut UnitFlags)) {
        let mut units = self.units.lock().expect("lock");
        f(units.entry(unit.to_string()).or_default());
    }
}

impl ServiceManager for RecordingHost {
    async fn load_unit(&self, unit: &str) -> Result<()> {
        self.record(format!("load {unit}"))?;
        self.update(unit, |u| u.loaded = true);
        Ok(())
    }

    async fn enable_unit(&self, unit: &str) -> Result<()> {
        self.record(format!("enable {unit}"))?;
        anyhow::ensure!(self.state(unit) != UnitState::Absent, "{unit} not loaded");
        self.update(unit, |u| u.enabled = true);
        Ok(())
    }

    async fn start_unit(&self, unit: &str) -> Result<()> {
        self.record(format!("start {unit}"))?;
        anyhow::ensure!(self.state(unit) != UnitState::Absent, "{unit} not loaded");
        self.update(unit, |u| u.running = true);
        Ok(())
    }

    async fn stop_unit(&self, unit: &str) -> Result<()> {
        self.record(format!("stop {unit}"))?;
        self.update(unit, |u| u.running = false);
        Ok(())
    }

    async fn disable_unit(&self, unit: &str) -> Result<()> {
        self.record(format!("disable {unit}"))?;
        self.update(unit, |u| u.enabled = false);
        Ok(())
    }

    async fn remove_unit(&self, unit: &str) -> Result<()> {
        self.record(format!("remove {unit}"))?;
        self.update(unit, |u| *u = UnitFlags::default());
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        self.record("reload daemon".to_string())
    }

    async fn unit_state(&self, unit: &str) -> Result<UnitState> {
        Ok(self.state(unit))
    }
}

impl GroupMembership for RecordingHost {
    async fn groups_of(&self, user: &str) -> Result<String> {
        self.record(format!("groups {user}"))?;
        Ok(self.groups.lock().expect("lock").clone())
    }
}

impl HelperExecutor for RecordingHost {
    async fn execute(&self, command: HelperCommand) -> Result<()> {
        self.record(format!("helper {command}"))?;
        let mut groups = self.groups.lock().expect("lock");
        groups.push_str(" dd-agent");
        Ok(())
    }
}

impl AgentLink for RecordingHost {
    async fn create(&self) -> Result<()> {
        self.record("link create".to_string())?;
        *self.link.lock().expect("lock") = Some(PathBuf::from(AGENT_BINARY));
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        self.record("link remove".to_string())?;
        *self.link.lock().expect("lock") = None;
        Ok(())
    }

    async fn target(&self) -> Result<Option<PathBuf>> {
        Ok(self.link())
    }
}

impl InstallInfoStore for RecordingHost {
    async fn write(&self, info: &InstallInfo) -> Result<()> {
        self.record("info write".to_string())?;
        *self.info.lock().expect("lock") = Some(info.clone());
        Ok(())
    }

    async fn remove(&self) {
        if self.record("info remove".to_string()).is_ok() {
            *self.info.lock().expect("lock") = None;
        }
    }

    async fn read(&self) -> Result<Option<InstallInfo>> {
        Ok(self.info())
    }
}

/// Reporter that discards every message.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
