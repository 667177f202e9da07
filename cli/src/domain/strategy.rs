//! Actions, verification checks and strategies.
//!
//! Everything here is plain data. The executor port interprets it; the
//! fallback chain orders and retries it.

use std::time::Duration;

use crate::domain::retry::RetryPolicy;

/// One external command: program, arguments and an optional timeout override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    #[must_use]
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: None,
        }
    }

    /// Override the runner's default timeout for this command.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Shell-like rendering used in logs and diagnostics.
    #[must_use]
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// A side-effecting operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run(CommandSpec),
    /// Commands run in order; the first failure ends the action.
    Sequence(Vec<CommandSpec>),
}

impl Action {
    #[must_use]
    pub fn run<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Run(CommandSpec::new(program, args))
    }

    /// Commands in execution order.
    #[must_use]
    pub fn commands(&self) -> &[CommandSpec] {
        match self {
            Self::Run(cmd) => std::slice::from_ref(cmd),
            Self::Sequence(cmds) => cmds,
        }
    }

    #[must_use]
    pub fn display(&self) -> String {
        self.commands()
            .iter()
            .map(CommandSpec::display)
            .collect::<Vec<_>>()
            .join(" && ")
    }
}

/// Evidence that an action actually produced what it was meant to,
/// independent of its exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// The action exits zero.
    Succeeds(Action),
    /// Every named workload is active.
    WorkloadsActive(Vec<String>),
    /// None of the named workloads is active.
    WorkloadsStopped(Vec<String>),
}

/// One method of achieving a goal.
#[derive(Debug, Clone)]
pub struct Strategy {
    /// Priority; lower is tried first.
    pub order: u32,
    pub name: String,
    pub action: Action,
    pub verify: Option<Check>,
    /// Corrective step run between transient failures.
    pub remediation: Option<Action>,
    pub retry: RetryPolicy,
}

impl Strategy {
    #[must_use]
    pub fn new(order: u32, name: &str, action: Action) -> Self {
        Self {
            order,
            name: name.to_string(),
            action,
            verify: None,
            remediation: None,
            retry: RetryPolicy::once(),
        }
    }

    #[must_use]
    pub fn verify(mut self, check: Check) -> Self {
        self.verify = Some(check);
        self
    }

    #[must_use]
    pub fn remediation(mut self, action: Action) -> Self {
        self.remediation = Some(action);
        self
    }

    #[must_use]
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }
}
