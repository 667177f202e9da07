//! Fallback chain resolver.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use crate::application::ports::{AttemptExecutor, ProgressReporter};
use crate::application::services::retry;
use crate::domain::error::{ChainError, StrategyFailure};
use crate::domain::outcome::Outcome;
use crate::domain::strategy::Strategy;

/// The strategy that achieved the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub strategy: String,
    pub attempts: u32,
}

/// Try `strategies` in ascending `order` until one succeeds.
///
/// `goal` is a verb phrase used in progress and error messages, e.g.
/// `"install the container runtime"`.
///
/// # Errors
///
/// Returns `ChainError::Exhausted` with every strategy's last failure when
/// none succeeds, or `ChainError::NoStrategies` for an empty list.
pub async fn resolve(
    executor: &impl AttemptExecutor,
    goal: &str,
    strategies: &[Strategy],
    reporter: &impl ProgressReporter,
) -> Result<Resolution, ChainError> {
    if strategies.is_empty() {
        return Err(ChainError::NoStrategies {
            goal: goal.to_string(),
        });
    }

    let mut ordered: Vec<&Strategy> = strategies.iter().collect();
    ordered.sort_by_key(|s| s.order);

    let mut failures = Vec::new();
    for strategy in ordered {
        reporter.step(&format!("{goal}: trying {}...", strategy.name));
        let report = retry::attempt(
            executor,
            &strategy.action,
            strategy.verify.as_ref(),
            strategy.retry,
            strategy.remediation.as_ref(),
        )
        .await;

        match report.outcome {
            Outcome::Success => {
                tracing::info!(goal, strategy = %strategy.name, attempts = report.attempts, "resolved");
                return Ok(Resolution {
                    strategy: strategy.name.clone(),
                    attempts: report.attempts,
                });
            }
            failed => {
                let failure = StrategyFailure {
                    strategy: strategy.name.clone(),
                    attempts: report.attempts,
                    fatal: failed.is_fatal(),
                    reason: failed.reason().unwrap_or_default().to_string(),
                };
                reporter.warn(&failure.to_string());
                failures.push(failure);
            }
        }
    }

    Err(ChainError::Exhausted {
        goal: goal.to_string(),
        failures,
    })
}
