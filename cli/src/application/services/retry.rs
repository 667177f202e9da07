//! Bounded retry around a single action.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use crate::application::ports::AttemptExecutor;
use crate::domain::outcome::Outcome;
use crate::domain::retry::RetryPolicy;
use crate::domain::strategy::{Action, Check};

/// Final outcome of a retried action and how many attempts it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryReport {
    pub outcome: Outcome,
    pub attempts: u32,
}

/// Run `action` (and `check`) up to `policy.max_attempts()` times.
///
/// A transient failure with attempts left runs `remediation` (best-effort)
/// and then sleeps `policy.delay()`. A fatal failure returns at once.
pub async fn attempt(
    executor: &impl AttemptExecutor,
    action: &Action,
    check: Option<&Check>,
    policy: RetryPolicy,
    remediation: Option<&Action>,
) -> RetryReport {
    let max = policy.max_attempts();
    let mut attempts = 0;
    loop {
        attempts += 1;
        let outcome = executor.execute(action, check).await;
        match &outcome {
            Outcome::Success => {
                tracing::debug!(attempts, action = %action.display(), "attempt succeeded");
                return RetryReport { outcome, attempts };
            }
            Outcome::Fatal(reason) => {
                tracing::warn!(attempts, %reason, "fatal failure, not retrying");
                return RetryReport { outcome, attempts };
            }
            Outcome::Transient(reason) if attempts >= max => {
                tracing::warn!(attempts, %reason, "transient failure, attempts exhausted");
                return RetryReport { outcome, attempts };
            }
            Outcome::Transient(reason) => {
                tracing::info!(attempt = attempts, max, %reason, "transient failure, retrying");
            }
        }

        if let Some(fix) = remediation {
            let fixed = executor.run(fix).await;
            if let Some(reason) = fixed.reason() {
                tracing::warn!(%reason, remediation = %fix.display(), "remediation failed");
            }
        }
        tokio::time::sleep(policy.delay()).await;
    }
}
