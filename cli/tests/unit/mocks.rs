//! Shared fake ports for unit tests.
//!
//! `FakeHost` simulates the container runtime and package tooling in memory
//! while using a real temporary directory for component files, so lifecycle
//! tests observe the same filesystem truth the state tracker does.

#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use stackup_cli::application::ports::{
    AttemptExecutor, CommandRunner, LocalFs, OperatorPrompt, PayloadSource, ProgressReporter,
    WorkloadInspector,
};
use stackup_cli::application::services::lifecycle::LifecycleSettings;
use stackup_cli::domain::component::{COMPOSE_FILE, Catalog, Component, PayloadFile};
use stackup_cli::domain::retry::RetryPolicy;
use stackup_cli::domain::strategy::{Action, Check};
use stackup_cli::domain::Outcome;
use tempfile::TempDir;

// ── Output helpers ────────────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(code << 8),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

/// Settings with the default retry shape and a separate data confirmation.
pub fn settings() -> LifecycleSettings {
    LifecycleSettings {
        timezone: "Europe/Berlin".to_string(),
        package_retry: RetryPolicy::new(3, Duration::from_secs(10)),
        workload_retry: RetryPolicy::new(3, Duration::from_secs(5)),
        confirm_data_separately: true,
        distro: "ubuntu".to_string(),
    }
}

// ── Fake host ─────────────────────────────────────────────────────────────────

/// In-memory container runtime over a real temporary base directory.
///
/// Actions succeed unless scripted. Scripted outcomes are matched by
/// substring of `Action::display()`; the last outcome of a script repeats.
/// Successful compose and package commands have their expected effect on
/// the simulated runtime.
pub struct FakeHost {
    pub catalog: Catalog,
    runtime: Mutex<bool>,
    running: Mutex<Vec<String>>,
    /// Containers that exist, running or exited.
    created: Mutex<Vec<String>>,
    rules: Mutex<Vec<(String, VecDeque<Outcome>)>>,
    calls: Mutex<Vec<String>>,
    /// `compose up` exits zero but no container starts.
    pub broken_up: bool,
    /// No payload is available for any component.
    pub payload_missing: bool,
    /// Workload queries fail.
    pub inspector_down: bool,
    dir: TempDir,
}

impl FakeHost {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        Self {
            catalog: Catalog::standard(dir.path()),
            runtime: Mutex::new(false),
            running: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            rules: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            broken_up: false,
            payload_missing: false,
            inspector_down: false,
            dir,
        }
    }

    #[must_use]
    pub fn with_runtime(self) -> Self {
        *self.runtime.lock().expect("lock") = true;
        self
    }

    #[must_use]
    pub fn script(self, pattern: &str, outcomes: Vec<Outcome>) -> Self {
        self.rules
            .lock()
            .expect("lock")
            .push((pattern.to_string(), outcomes.into()));
        self
    }

    pub fn base_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn component(&self, name: &str) -> &Component {
        self.catalog.get(name).expect("component in catalog")
    }

    /// Simulate a component whose directory exists with its workloads stopped.
    pub fn install_stopped(&self, name: &str) {
        let dir = &self.component(name).install_path;
        std::fs::create_dir_all(dir.join("data")).expect("create dir");
        std::fs::write(dir.join(COMPOSE_FILE), b"services: {}\n").expect("write");
    }

    /// Simulate a component that is installed and running.
    pub fn install_running(&self, name: &str) {
        self.install_stopped(name);
        let workloads = self.component(name).workload_names.clone();
        self.created.lock().expect("lock").extend(workloads.clone());
        self.running.lock().expect("lock").extend(workloads);
    }

    /// Kill a workload behind the tool's back.
    pub fn kill(&self, workload: &str) {
        self.running.lock().expect("lock").retain(|w| w != workload);
    }

    pub fn is_running(&self, workload: &str) -> bool {
        self.running.lock().expect("lock").iter().any(|w| w == workload)
    }

    /// Whether a container exists for `workload`, running or not.
    pub fn has_container(&self, workload: &str) -> bool {
        self.created.lock().expect("lock").iter().any(|w| w == workload)
    }

    pub fn runtime_installed(&self) -> bool {
        *self.runtime.lock().expect("lock")
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn count_calls(&self, pattern: &str) -> usize {
        self.calls().iter().filter(|c| c.contains(pattern)).count()
    }

    fn next_outcome(&self, display: &str) -> Outcome {
        let mut rules = self.rules.lock().expect("lock");
        for (pattern, outcomes) in rules.iter_mut() {
            if !display.contains(pattern.as_str()) {
                continue;
            }
            return if outcomes.len() > 1 {
                outcomes.pop_front().expect("non-empty")
            } else {
                outcomes.front().cloned().unwrap_or(Outcome::Success)
            };
        }
        Outcome::Success
    }

    fn workloads_of(&self, project: &str) -> Vec<String> {
        self.catalog
            .get(project)
            .map(|c| c.workload_names.clone())
            .unwrap_or_default()
    }

    fn apply_effects(&self, action: &Action) {
        for cmd in action.commands() {
            let args: Vec<&str> = cmd.args.iter().map(String::as_str).collect();
            let project = args
                .iter()
                .position(|a| *a == "-p")
                .and_then(|i| args.get(i + 1));
            if let Some(project) = project {
                let workloads = self.workloads_of(project);
                let mut running = self.running.lock().expect("lock");
                let mut created = self.created.lock().expect("lock");
                if args.last() == Some(&"-d") {
                    created.extend(workloads.clone());
                    if !self.broken_up {
                        running.extend(workloads);
                    }
                } else if args.last() == Some(&"down") {
                    running.retain(|w| !workloads.contains(w));
                    created.retain(|w| !workloads.contains(w));
                }
            } else if cmd.program == "docker" && args.first() == Some(&"rm") {
                let mut running = self.running.lock().expect("lock");
                running.retain(|w| !args.contains(&w.as_str()));
                let mut created = self.created.lock().expect("lock");
                created.retain(|w| !args.contains(&w.as_str()));
            } else if args.contains(&"docker-ce")
                || args.contains(&"docker.io")
                || cmd.program == "snap"
            {
                *self.runtime.lock().expect("lock") = true;
            }
        }
    }
}

impl AttemptExecutor for FakeHost {
    async fn run(&self, action: &Action) -> Outcome {
        let display = action.display();
        self.calls.lock().expect("lock").push(display.clone());
        let outcome = self.next_outcome(&display);
        if outcome.is_success() {
            self.apply_effects(action);
        }
        outcome
    }

    async fn verify(&self, check: &Check) -> Result<(), String> {
        match check {
            Check::Succeeds(action) if action.display() == "docker --version" => {
                if self.runtime_installed() {
                    Ok(())
                } else {
                    Err("docker: command not found".to_string())
                }
            }
            Check::Succeeds(action) => match self.run(action).await {
                Outcome::Success => Ok(()),
                failed => Err(failed.reason().unwrap_or_default().to_string()),
            },
            Check::WorkloadsActive(names) => {
                if names.iter().all(|n| self.is_running(n)) {
                    Ok(())
                } else {
                    Err(format!("not running: {}", names.join(", ")))
                }
            }
            Check::WorkloadsStopped(names) => {
                if names.iter().any(|n| self.is_running(n)) {
                    Err(format!("still running: {}", names.join(", ")))
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl WorkloadInspector for FakeHost {
    async fn active_workloads(&self, names: &[String]) -> Result<Vec<String>> {
        if self.inspector_down {
            anyhow::bail!("Cannot connect to the Docker daemon");
        }
        Ok(names.iter().filter(|n| self.is_running(n)).cloned().collect())
    }
}

impl LocalFs for FakeHost {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).with_context(|| format!("create {}", path.display()))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::remove_dir_all(path).with_context(|| format!("remove {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        std::fs::write(path, contents).with_context(|| format!("write {}", path.display()))
    }
}

impl PayloadSource for FakeHost {
    fn payload(&self, component: &Component) -> Result<Vec<PayloadFile>> {
        if self.payload_missing {
            anyhow::bail!("no payload bundled for {}", component.name);
        }
        Ok(vec![PayloadFile {
            name: COMPOSE_FILE.to_string(),
            contents: format!("services:\n  {}: {{}}\n", component.name).into_bytes(),
        }])
    }
}

// ── Prompt and reporter ───────────────────────────────────────────────────────

/// Answers confirmations and menu reads from fixed scripts.
///
/// An unscripted confirmation is an error so tests notice unexpected prompts.
#[derive(Default)]
pub struct ScriptedPrompt {
    confirms: Mutex<VecDeque<bool>>,
    selections: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn confirming(answers: &[bool]) -> Self {
        Self {
            confirms: Mutex::new(answers.iter().copied().collect()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn selecting(mut self, lines: &[&str]) -> Self {
        self.selections = Mutex::new(lines.iter().map(ToString::to_string).collect());
        self
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().expect("lock").clone()
    }
}

impl OperatorPrompt for ScriptedPrompt {
    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        self.asked.lock().expect("lock").push(prompt.to_string());
        self.confirms
            .lock()
            .expect("lock")
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected prompt: {prompt}"))
    }

    fn read_selection(&self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.selections.lock().expect("lock").pop_front())
    }
}

/// Collects progress events as `(kind, message)` pairs.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingReporter {
    pub fn messages(&self, kind: &str) -> Vec<String> {
        self.events
            .lock()
            .expect("lock")
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, kind: &'static str, message: &str) {
        self.events
            .lock()
            .expect("lock")
            .push((kind, message.to_string()));
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.push("step", message);
    }
    fn success(&self, message: &str) {
        self.push("success", message);
    }
    fn warn(&self, message: &str) {
        self.push("warn", message);
    }
    fn error(&self, message: &str) {
        self.push("error", message);
    }
}

// ── Command runner ────────────────────────────────────────────────────────────

/// A recorded runner invocation: program, arguments, timeout override.
pub type RunnerCall = (String, Vec<String>, Option<Duration>);

/// Replays canned process results in order; unscripted calls exit zero.
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<Result<Output>>>,
    calls: Arc<Mutex<Vec<RunnerCall>>>,
}

impl ScriptedRunner {
    pub fn new(responses: Vec<Result<Output>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Arc::default(),
        }
    }

    /// Handle for inspecting calls after the runner is moved into a host.
    pub fn calls(&self) -> Arc<Mutex<Vec<RunnerCall>>> {
        Arc::clone(&self.calls)
    }

    fn respond(&self, program: &str, args: &[&str], timeout: Option<Duration>) -> Result<Output> {
        self.calls.lock().expect("lock").push((
            program.to_string(),
            args.iter().map(ToString::to_string).collect(),
            timeout,
        ));
        self.responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Ok(ok_output(b"")))
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.respond(program, args, None)
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        self.respond(program, args, Some(timeout))
    }
}
