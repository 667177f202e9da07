//! `AttemptExecutor` for `SystemHost`: runs actions and classifies failures.

use std::io::ErrorKind;

use crate::application::ports::{AttemptExecutor, CommandRunner, WorkloadInspector};
use crate::domain::outcome::{Outcome, classify_failure, summarize};
use crate::domain::strategy::{Action, Check, CommandSpec};
use crate::infra::host::SystemHost;

impl<R: CommandRunner> SystemHost<R> {
    async fn run_command(&self, cmd: &CommandSpec) -> Outcome {
        let args: Vec<&str> = cmd.args.iter().map(String::as_str).collect();
        let result = match cmd.timeout {
            Some(timeout) => {
                self.runner
                    .run_with_timeout(&cmd.program, &args, timeout)
                    .await
            }
            None => self.runner.run(&cmd.program, &args).await,
        };

        let output = match result {
            Ok(output) => output,
            Err(e) => return spawn_failure(cmd, &e),
        };
        if output.status.success() {
            return Outcome::Success;
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let diagnostics = if stderr.trim().is_empty() { &stdout } else { &stderr };
        let code = output.status.code();
        let class = classify_failure(code, &format!("{stderr}\n{stdout}"));
        let status = code.map_or_else(|| "a signal".to_string(), |c| format!("exit code {c}"));
        let reason = format!(
            "{} failed with {status}: {}",
            cmd.program,
            summarize(diagnostics)
        );
        tracing::debug!(command = %cmd.display(), ?class, %reason, "command failed");
        Outcome::failure(class, reason)
    }
}

/// The runner could not start or finish the command.
fn spawn_failure(cmd: &CommandSpec, err: &anyhow::Error) -> Outcome {
    let kind = err
        .chain()
        .find_map(|c| c.downcast_ref::<std::io::Error>())
        .map(std::io::Error::kind);
    let reason = format!("{err:#}");
    tracing::debug!(command = %cmd.display(), %reason, "command did not complete");
    match kind {
        Some(ErrorKind::NotFound | ErrorKind::PermissionDenied) => Outcome::Fatal(reason),
        _ => Outcome::failure(classify_failure(None, &reason), reason),
    }
}

fn missing_from(names: &[String], active: &[String]) -> Vec<String> {
    names
        .iter()
        .filter(|n| !active.contains(n))
        .cloned()
        .collect()
}

impl<R: CommandRunner> AttemptExecutor for SystemHost<R> {
    async fn run(&self, action: &Action) -> Outcome {
        for cmd in action.commands() {
            let outcome = self.run_command(cmd).await;
            if !outcome.is_success() {
                return outcome;
            }
        }
        Outcome::Success
    }

    async fn verify(&self, check: &Check) -> Result<(), String> {
        match check {
            Check::Succeeds(action) => match self.run(action).await {
                Outcome::Success => Ok(()),
                failed => Err(failed.reason().unwrap_or_default().to_string()),
            },
            Check::WorkloadsActive(names) => {
                let active = self
                    .active_workloads(names)
                    .await
                    .map_err(|e| format!("{e:#}"))?;
                let missing = missing_from(names, &active);
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(format!("not running: {}", missing.join(", ")))
                }
            }
            Check::WorkloadsStopped(names) => {
                let active = self
                    .active_workloads(names)
                    .await
                    .map_err(|e| format!("{e:#}"))?;
                if active.is_empty() {
                    Ok(())
                } else {
                    Err(format!("still running: {}", active.join(", ")))
                }
            }
        }
    }
}
