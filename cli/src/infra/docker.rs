//! `WorkloadInspector` for `SystemHost`, backed by `docker ps`.

use std::collections::HashSet;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, WorkloadInspector};
use crate::domain::outcome::summarize;
use crate::infra::host::SystemHost;

/// Names of running containers from `docker ps --format {{.Names}}` output.
///
/// A container with several names prints them comma-separated.
#[must_use]
pub fn parse_container_names(stdout: &[u8]) -> HashSet<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

impl<R: CommandRunner> WorkloadInspector for SystemHost<R> {
    async fn active_workloads(&self, names: &[String]) -> Result<Vec<String>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let output = self
            .runner
            .run("docker", &["ps", "--format", "{{.Names}}"])
            .await
            .context("querying running containers")?;
        if !output.status.success() {
            anyhow::bail!(
                "docker ps failed: {}",
                summarize(&String::from_utf8_lossy(&output.stderr))
            );
        }
        let running = parse_container_names(&output.stdout);
        Ok(names
            .iter()
            .filter(|n| running.contains(n.as_str()))
            .cloned()
            .collect())
    }
}
