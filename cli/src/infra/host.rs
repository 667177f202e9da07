//! The production `Host`: every lifecycle port backed by the local machine.
//!
//! Port implementations live next to their concern:
//! `executor.rs` (`AttemptExecutor`), `docker.rs` (`WorkloadInspector`),
//! `fs.rs` (`LocalFs`) and `assets.rs` (`PayloadSource`).

use crate::application::ports::CommandRunner;
use crate::infra::command_runner::TokioCommandRunner;

/// Infrastructure adapter that routes every host command through a `CommandRunner`.
///
/// Generic over `R: CommandRunner` so that tests can inject a scripted runner
/// without spawning real processes.
pub struct SystemHost<R: CommandRunner> {
    pub(super) runner: R,
}

impl<R: CommandRunner> SystemHost<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl SystemHost<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}
