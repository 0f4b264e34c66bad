//! Human-readable terminal renderer.

use std::path::Path;

use chrono::SecondsFormat;
use installer_common::Channel;
use owo_colors::OwoColorize as _;

use crate::domain::{InstallStatus, InstallerConfig, UnitState};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render unit states, symlink and install marker.
    ///
    /// `channel` limits the unit table to one channel.
    pub fn render_status(&self, status: &InstallStatus, channel: Option<Channel>) {
        let summary = if status.is_installed() {
            "installed"
        } else if status.is_absent() {
            "not installed"
        } else {
            "partially installed"
        };
        self.ctx.kv("Agent:", summary);
        if status.experiment_running() {
            self.ctx.kv("Experiment:", "running");
        }

        for ch in [Channel::Stable, Channel::Experimental] {
            if channel.is_some_and(|c| c != ch) {
                continue;
            }
            println!();
            self.ctx.header(&format!("{ch} units:"));
            for unit in status.channel(ch) {
                self.print_unit(&unit.name, unit.state);
            }
        }

        println!();
        let link = status
            .symlink_target
            .as_deref()
            .map_or_else(|| "(absent)".to_string(), |p| p.display().to_string());
        self.ctx.kv("Symlink:", &link);
        match &status.install_info {
            Some(info) => {
                let installed_at = info
                    .install_method
                    .installed_at
                    .map_or_else(
                        || "unknown".to_string(),
                        |t| t.to_rfc3339_opts(SecondsFormat::Secs, true),
                    );
                self.ctx.kv(
                    "Installed by:",
                    &format!(
                        "{} v{} ({installed_at})",
                        info.package_type(),
                        info.install_method.installer_version
                    ),
                );
            }
            None => self.ctx.kv("Installed by:", "(no install info)"),
        }
    }

    /// Render the effective installer configuration.
    pub fn render_config(&self, config: &InstallerConfig, path: &Path) {
        if self.ctx.quiet {
            return;
        }
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<26} {}", "units.prefix:", config.units.prefix);
        let subcomponents = config
            .units
            .subcomponents
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {:<26} {subcomponents}", "units.subcomponents:");
        println!("  {:<26} {}", "identity.installer_user:", config.identity.installer_user);
        println!("  {:<26} {}", "identity.agent_group:", config.identity.agent_group);
        println!("  {:<26} {}", "paths.unit_source_dir:", config.paths.unit_source_dir.display());
        println!("  {:<26} {}", "paths.systemd_dir:", config.paths.systemd_dir.display());
        println!("  {:<26} {}", "paths.agent_symlink:", config.paths.agent_symlink.display());
        println!("  {:<26} {}", "paths.agent_binary:", config.paths.agent_binary.display());
        println!("  {:<26} {}", "paths.install_info:", config.paths.install_info.display());
        println!("  {:<26} {}", "helper.path:", config.helper.path.display());
        println!("  {:<26} {}", "helper.sudo:", config.helper.sudo);
        println!("  {:<26} {}", "commands.systemctl:", config.commands.systemctl);
        println!("  {:<26} {}s", "commands.timeout_secs:", config.commands.timeout_secs);
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["AGENT_INSTALLER_CONFIG", "RUST_LOG", "NO_COLOR"] {
            println!(
                "    {:<24} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }

    fn print_unit(&self, name: &str, state: UnitState) {
        if self.ctx.quiet {
            return;
        }
        let style = match state {
            UnitState::Running => self.ctx.styles.success,
            UnitState::Enabled | UnitState::Loaded => self.ctx.styles.info,
            UnitState::Absent => self.ctx.styles.dim,
        };
        println!("    {name:<40} {}", state.style(style));
    }
}
