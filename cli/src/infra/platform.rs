//! Host implementation of the `PlatformProbe` port.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, PlatformProbe};
use crate::domain::platform::{OsRelease, parse_os_release};
use crate::infra::command_runner::TokioCommandRunner;

const OS_RELEASE: &str = "/etc/os-release";

pub struct HostPlatform<R: CommandRunner> {
    runner: R,
    os_release_path: PathBuf,
}

impl<R: CommandRunner> HostPlatform<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            os_release_path: PathBuf::from(OS_RELEASE),
        }
    }
}

impl HostPlatform<TokioCommandRunner> {
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}

impl<R: CommandRunner> PlatformProbe for HostPlatform<R> {
    fn os(&self) -> &str {
        std::env::consts::OS
    }

    async fn os_release(&self) -> Option<OsRelease> {
        match std::fs::read_to_string(&self.os_release_path) {
            Ok(contents) => Some(parse_os_release(&contents)),
            Err(e) => {
                tracing::debug!(path = %self.os_release_path.display(), error = %e, "no os-release");
                None
            }
        }
    }

    async fn effective_uid(&self) -> Result<u32> {
        let output = self
            .runner
            .run("id", &["-u"])
            .await
            .context("querying effective uid")?;
        anyhow::ensure!(output.status.success(), "id -u failed");
        String::from_utf8_lossy(&output.stdout)
            .trim()
            .parse()
            .context("parsing output of id -u")
    }
}
