//! Application context: unified state passed to every command handler.
//!
//! `AppContext` owns the production adapters and output settings. `Session`
//! holds what mutating commands need once the host has passed startup checks.

use anyhow::Result;

use crate::application::services::lifecycle::LifecycleSettings;
use crate::application::services::{config_service, preflight};
use crate::domain::component::{Catalog, Component};
use crate::domain::config::StackupConfig;
use crate::domain::error::LifecycleError;
use crate::domain::platform::apt_distro;
use crate::infra::{HostPlatform, SystemHost, TerminalPrompt, TokioCommandRunner, YamlConfigStore};
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

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `STACKUP_YES` env vars).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Host adapter: commands, containers, filesystem, payloads.
    pub host: SystemHost<TokioCommandRunner>,
    /// Privilege and distribution checks.
    pub platform: HostPlatform<TokioCommandRunner>,
    /// Configuration file access.
    pub config_store: YamlConfigStore,
    /// Operator prompts.
    pub prompt: TerminalPrompt,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `STACKUP_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

/// Everything a mutating command needs after startup checks pass.
pub struct Session {
    pub config: StackupConfig,
    pub catalog: Catalog,
    pub settings: LifecycleSettings,
}

impl Session {
    /// Build a session from loaded configuration and the host's distro flavour.
    #[must_use]
    pub fn new(config: StackupConfig, distro: &str) -> Self {
        let catalog = Catalog::standard(&config.base_dir);
        let settings = LifecycleSettings::from_config(&config, distro);
        Self {
            config,
            catalog,
            settings,
        }
    }

    /// Look up a component by name.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::UnknownComponent` listing valid names.
    pub fn component(&self, name: &str) -> Result<&Component> {
        self.catalog.get(name).ok_or_else(|| {
            LifecycleError::UnknownComponent(name.to_string(), self.catalog.names()).into()
        })
    }
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &AppFlags) -> Self {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("STACKUP_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            // Progress lines would corrupt JSON on stdout.
            output: OutputContext::new(flags.output.no_color, flags.output.quiet || flags.output.json),
            mode,
            host: SystemHost::default_runner(),
            platform: HostPlatform::default_runner(),
            config_store: YamlConfigStore::default(),
            prompt: TerminalPrompt { non_interactive },
            non_interactive,
        }
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Prompt for the interactive menu, where the operator is always asked.
    #[must_use]
    pub const fn menu_prompt(&self) -> TerminalPrompt {
        TerminalPrompt::interactive()
    }

    /// Progress reporter bound to this context's output settings.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Load configuration without touching the host.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn load_config(&self) -> Result<StackupConfig> {
        config_service::load_config(&self.config_store)
    }

    /// Run startup checks and load configuration.
    ///
    /// # Errors
    ///
    /// Returns a `StartupError` when the host is unsupported or the process is
    /// not root, or a config error if the file cannot be loaded.
    pub async fn start_session(&self) -> Result<Session> {
        let release = preflight::check_host(&self.platform).await?;
        let config = self.load_config()?;
        tracing::debug!(distro = apt_distro(&release), base_dir = %config.base_dir.display(), "session ready");
        Ok(Session::new(config, apt_distro(&release)))
    }
}
