//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::application::services::chain::Resolution;
use crate::application::services::lifecycle::{RemoveOutcome, RuntimeOutcome};
use crate::domain::component::Component;
use crate::domain::menu::MenuEntry;
use crate::domain::{StackupConfig, StatusReport};
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

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.info(&format!("stackup v{version}"));
    }

    /// Render runtime and per-component status.
    pub fn render_status(&self, report: &StatusReport) {
        if self.ctx.quiet {
            return;
        }
        self.status_lines(report);
    }

    fn status_lines(&self, report: &StatusReport) {
        let styles = &self.ctx.styles;
        let runtime = if report.runtime_present {
            "installed".style(styles.ok).to_string()
        } else {
            "not installed".style(styles.muted).to_string()
        };
        println!("  {:<28}  {runtime}", "Container runtime");
        for c in &report.components {
            println!(
                "  {:<28}  {:<22}  {}",
                c.title,
                c.status.style(styles.for_status(c.status)).to_string(),
                c.install_path.display().style(styles.muted)
            );
        }
    }

    /// Render the menu: status block followed by numbered entries.
    pub fn render_menu(&self, report: &StatusReport, entries: &[MenuEntry]) {
        println!();
        println!("  {}", "stackup".style(self.ctx.styles.title));
        println!();
        // The menu is interactive, so it ignores `--quiet`.
        self.status_lines(report);
        println!();
        for entry in entries {
            println!("  {:>2}) {}", entry.key.style(self.ctx.styles.key), entry.label);
        }
        println!();
    }

    /// Render a successful install.
    pub fn render_install(&self, component: &Component, resolution: &Resolution) {
        self.ctx.success(&format!(
            "{} installed in {} (via {})",
            component.title,
            component.install_path.display(),
            resolution.strategy
        ));
    }

    /// Render the result of a removal.
    pub fn render_remove(&self, component: &Component, outcome: RemoveOutcome) {
        match outcome {
            RemoveOutcome::NotFound => {
                self.ctx
                    .info(&format!("{} is not installed; nothing to remove", component.title));
            }
            RemoveOutcome::Cancelled => self.ctx.info("Cancelled."),
            RemoveOutcome::Stopped => {
                self.ctx.success(&format!("{} stopped", component.title));
                self.ctx.info(&format!(
                    "Data kept in {}. Remove again to delete it.",
                    component.install_path.display()
                ));
            }
            RemoveOutcome::Removed => {
                self.ctx
                    .success(&format!("{} removed with all data", component.title));
            }
        }
    }

    /// Render the result of a runtime install.
    pub fn render_runtime(&self, outcome: &RuntimeOutcome) {
        match outcome {
            RuntimeOutcome::AlreadyPresent => {
                self.ctx.info("Container runtime already installed");
            }
            RuntimeOutcome::Installed { strategy } => {
                self.ctx
                    .success(&format!("Container runtime ready (via {strategy})"));
            }
        }
    }

    /// Render the effective configuration.
    pub fn render_config(&self, config: &StackupConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.title)
        );
        println!();
        let rows = [
            ("base_dir:", config.base_dir.display().to_string()),
            ("timezone:", config.timezone.clone()),
            (
                "retry.package.max_attempts:",
                config.retry.package.max_attempts.to_string(),
            ),
            (
                "retry.package.delay_secs:",
                config.retry.package.delay_secs.to_string(),
            ),
            (
                "retry.workload.max_attempts:",
                config.retry.workload.max_attempts.to_string(),
            ),
            (
                "retry.workload.delay_secs:",
                config.retry.workload.delay_secs.to_string(),
            ),
            (
                "removal.confirm_data_separately:",
                config.removal.confirm_data_separately.to_string(),
            ),
        ];
        for (key, value) in rows {
            println!("  {key:<34} {value}");
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.key));
        for var in ["STACKUP_CONFIG", "STACKUP_LOG", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }
}
