//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Fallback chain errors ─────────────────────────────────────────────────────

/// Why a single strategy of a fallback chain gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyFailure {
    /// Strategy name, e.g. `"vendor repository"`.
    pub strategy: String,
    /// Number of attempts made before giving up.
    pub attempts: u32,
    /// `true` when the last attempt was classified fatal.
    pub fatal: bool,
    /// Reason reported by the last attempt.
    pub reason: String,
}

impl std::fmt::Display for StrategyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.fatal { "fatal" } else { "transient" };
        let noun = if self.attempts == 1 { "attempt" } else { "attempts" };
        write!(
            f,
            "{}: {kind} after {} {noun}: {}",
            self.strategy, self.attempts, self.reason
        )
    }
}

/// Every strategy of a chain failed.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("could not {goal}: no strategy available")]
    NoStrategies { goal: String },

    #[error("could not {goal}; every strategy failed:\n{}", format_failures(.failures))]
    Exhausted {
        goal: String,
        failures: Vec<StrategyFailure>,
    },
}

impl ChainError {
    /// Per-strategy failure reasons, in the order the strategies were tried.
    #[must_use]
    pub fn failures(&self) -> &[StrategyFailure] {
        match self {
            Self::NoStrategies { .. } => &[],
            Self::Exhausted { failures, .. } => failures,
        }
    }
}

fn format_failures(failures: &[StrategyFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("  - {f}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Lifecycle errors ──────────────────────────────────────────────────────────

/// Errors returned by component lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("{component} is already installed ({status}). Remove it first: stackup remove {component}")]
    Conflict { component: String, status: String },

    #[error("Unknown component '{0}'. Available: {1}")]
    UnknownComponent(String, String),

    #[error("Container runtime is not installed. Install it first: stackup runtime")]
    RuntimeMissing,

    #[error("failed to install {component}")]
    Failed {
        component: String,
        #[source]
        source: ChainError,
    },
}

// ── Startup errors ────────────────────────────────────────────────────────────

/// Unrecoverable host conditions detected before any operation runs.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("stackup must be run as root (current uid {0}). Re-run with sudo.")]
    NotRoot(u32),

    #[error("Unsupported platform: {0}. stackup supports Debian and Ubuntu based Linux hosts.")]
    UnsupportedPlatform(String),

    #[error("could not determine the current user: {0}")]
    PrivilegeUnknown(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nExpected: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}
