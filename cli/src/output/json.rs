//! JSON output helpers.
//!
//! Used by every `--json` code path. Errors share one schema:
//! `{ "error": true, "message": "...", "code": "..." }`.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use crate::application::services::chain::Resolution;
use crate::application::services::lifecycle::{RemoveOutcome, RuntimeOutcome};
use crate::domain::component::Component;
use crate::domain::{StackupConfig, StatusReport};

/// Renders domain types as pretty-printed JSON on stdout.
pub struct JsonRenderer;

fn print(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{text}");
    Ok(())
}

#[allow(clippy::unused_self)]
impl JsonRenderer {
    /// Render runtime and per-component status.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_status(&self, report: &StatusReport) -> Result<()> {
        print(&serde_json::to_value(report).context("serializing status")?)
    }

    /// Render the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(&self, config: &StackupConfig, path: &Path) -> Result<()> {
        print(&json!({
            "path": path.display().to_string(),
            "config": config,
        }))
    }

    /// Render version information.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        print(&json!({ "version": version }))
    }

    /// Render a successful install.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_install(&self, component: &Component, resolution: &Resolution) -> Result<()> {
        print(&json!({
            "component": component.name,
            "outcome": "installed",
            "strategy": resolution.strategy,
            "attempts": resolution.attempts,
        }))
    }

    /// Render the result of a removal.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_remove(&self, component: &Component, outcome: RemoveOutcome) -> Result<()> {
        let word = match outcome {
            RemoveOutcome::NotFound => "not_found",
            RemoveOutcome::Cancelled => "cancelled",
            RemoveOutcome::Stopped => "stopped",
            RemoveOutcome::Removed => "removed",
        };
        print(&json!({ "component": component.name, "outcome": word }))
    }

    /// Render the result of a runtime install.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_runtime(&self, outcome: &RuntimeOutcome) -> Result<()> {
        let value = match outcome {
            RuntimeOutcome::AlreadyPresent => json!({ "outcome": "already_present" }),
            RuntimeOutcome::Installed { strategy } => {
                json!({ "outcome": "installed", "strategy": strategy })
            }
        };
        print(&value)
    }
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
