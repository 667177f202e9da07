//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::component::{Component, PayloadFile};
use crate::domain::config::StackupConfig;
use crate::domain::outcome::Outcome;
use crate::domain::platform::OsRelease;
use crate::domain::strategy::{Action, Check};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Attempt Execution Ports ───────────────────────────────────────────────────

/// Runs actions and verification checks against the host.
///
/// Implementations never return `Err`: every failure is folded into an
/// [`Outcome`] so the retry and fallback logic can classify it.
#[allow(async_fn_in_trait)]
pub trait AttemptExecutor {
    /// Run an action once and classify the result.
    async fn run(&self, action: &Action) -> Outcome;

    /// Evaluate a check. `Err` carries a short reason.
    async fn verify(&self, check: &Check) -> std::result::Result<(), String>;

    /// Run `action`, then `check` if the action succeeded.
    ///
    /// An action that exits cleanly but fails its check counts as a
    /// transient failure.
    async fn execute(&self, action: &Action, check: Option<&Check>) -> Outcome {
        let outcome = self.run(action).await;
        if !outcome.is_success() {
            return outcome;
        }
        match check {
            None => Outcome::Success,
            Some(check) => match self.verify(check).await {
                Ok(()) => Outcome::Success,
                Err(reason) => Outcome::Transient(format!("verification failed: {reason}")),
            },
        }
    }
}

/// Reports which named workloads are active on the container runtime.
#[allow(async_fn_in_trait)]
pub trait WorkloadInspector {
    /// Return the subset of `names` that is currently active.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be queried.
    async fn active_workloads(&self, names: &[String]) -> Result<Vec<String>>;
}

// ── Filesystem and Payload Ports ──────────────────────────────────────────────

/// Abstracts the local filesystem operations used by component lifecycle.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    /// Create a directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Remove a directory tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be removed.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    /// Write a file, replacing any existing contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
}

/// Supplies the configuration files shipped with each component.
pub trait PayloadSource {
    /// Files to write into the component directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no payload exists for the component.
    fn payload(&self, component: &Component) -> Result<Vec<PayloadFile>>;
}

/// Composite trait: everything the lifecycle controller needs from the host.
pub trait Host: AttemptExecutor + WorkloadInspector + LocalFs + PayloadSource {}

/// Blanket implementation: any type implementing all four sub-traits is a `Host`.
impl<T> Host for T where T: AttemptExecutor + WorkloadInspector + LocalFs + PayloadSource {}

// ── Operator Interaction Ports ────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait: no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit an error message.
    fn error(&self, message: &str);
}

/// Asks the operator questions.
pub trait OperatorPrompt {
    /// Ask a yes/no question. Non-interactive implementations return `default`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Read one line of input. `None` means end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read.
    fn read_selection(&self, prompt: &str) -> Result<Option<String>>;
}

// ── Configuration and Platform Ports ──────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<StackupConfig>;
    /// Persist the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &StackupConfig) -> Result<()>;
    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}

/// Host facts needed by startup checks.
#[allow(async_fn_in_trait)]
pub trait PlatformProbe {
    /// Operating system name, as in `std::env::consts::OS`.
    fn os(&self) -> &str;
    /// Parsed `/etc/os-release`, or `None` if it cannot be read.
    async fn os_release(&self) -> Option<OsRelease>;
    /// Effective user id of this process.
    ///
    /// # Errors
    ///
    /// Returns an error if the uid cannot be determined.
    async fn effective_uid(&self) -> Result<u32>;
}
