//! Application context: unified state passed to every command handler.
//!
//! Built once in `Cli::run()` from the global flags and the loaded
//! configuration. The unit registry is validated here, before any command
//! touches the host.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::application::ports::ConfigStore;
use crate::domain::{InstallerConfig, UnitSet};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::host::LinuxHost;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    pub output: OutputFlags,
    /// Explicit configuration path (`--config`).
    pub config: Option<PathBuf>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context. Quiet in JSON mode so progress lines never
    /// interleave with the JSON document.
    pub output: OutputContext,
    pub mode: OutputMode,
    pub config_store: YamlConfigStore,
    pub config: InstallerConfig,
    /// Validated unit registry.
    pub units: UnitSet,
    pub host: LinuxHost<TokioCommandRunner>,
    /// Cancelled on Ctrl-C.
    pub cancel: CancellationToken,
}

impl AppContext {
    /// Load configuration and build the host adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or does not
    /// describe a valid unit set.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        let config_store = YamlConfigStore::new(flags.config.clone());
        let config = config_store.load()?;
        let units = config
            .unit_set()
            .with_context(|| format!("invalid unit set in {}", config_store.path().display()))?;
        tracing::debug!(units = units.len(), prefix = %config.units.prefix, "configuration loaded");

        Ok(Self {
            output: OutputContext::new(
                flags.output.no_color,
                flags.output.quiet || flags.output.json,
            ),
            mode,
            host: LinuxHost::from_config(&config),
            config_store,
            config,
            units,
            cancel: CancellationToken::new(),
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Cancel the context token on the first Ctrl-C.
    ///
    /// The running step completes; the next step boundary observes the
    /// cancellation.
    pub fn cancel_on_interrupt(&self) {
        let token = self.cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, cancelling after the current step");
                token.cancel();
            }
        });
    }
}
