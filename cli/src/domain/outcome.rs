//! Attempt outcomes and failure classification.
//!
//! Pure functions only. The executor captures exit codes and stderr; this
//! module decides whether a failure is worth retrying.

#![allow(clippy::expect_used)] // Patterns are compile-time constants

use std::sync::LazyLock;

use regex::RegexSet;

/// Result of a single attempt at an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Retryable: network errors, lock contention, momentary unavailability.
    Transient(String),
    /// Not retryable: missing privilege, unsupported platform, invalid config.
    Fatal(String),
}

impl Outcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// Failure reason, or `None` for `Success`.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Transient(r) | Self::Fatal(r) => Some(r),
        }
    }

    /// Build a failure outcome of the given class.
    #[must_use]
    pub fn failure(class: FailureClass, reason: impl Into<String>) -> Self {
        match class {
            FailureClass::Transient => Self::Transient(reason.into()),
            FailureClass::Fatal => Self::Fatal(reason.into()),
        }
    }
}

/// Failure class assigned by [`classify_failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Transient,
    Fatal,
}

static TRANSIENT: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // network
        r"(?i)could not resolve",
        r"(?i)temporary failure",
        r"(?i)timed? ?out",
        r"(?i)connection (refused|reset|closed)",
        r"(?i)network is unreachable",
        r"(?i)tls handshake",
        r"(?i)failed to fetch",
        r"(?i)unexpected eof",
        // lock contention
        r"(?i)could not get lock",
        r"(?i)lock-frontend",
        r"(?i)another process",
        r"(?i)resource temporarily unavailable",
        // server side
        r"\b50[0-4]\b",
        r"(?i)too many requests",
        r"(?i)service unavailable",
    ])
    .expect("valid transient patterns")
});

static PRIVILEGE: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)permission denied",
        r"(?i)must be run as root",
        r"(?i)are you root",
        r"(?i)operation not permitted",
    ])
    .expect("valid privilege patterns")
});

static FATAL: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // platform
        r"(?i)unsupported",
        r"(?i)not supported",
        // configuration
        r"(?i)invalid",
        r"(?i)unable to locate package",
        r"(?i)has no installation candidate",
        r"(?i)command not found",
    ])
    .expect("valid fatal patterns")
});

/// Classify a failed command from its exit code and diagnostic text.
///
/// Exit codes 126 and 127 (not executable / not found) are always fatal, and
/// so is missing privilege even when the message also names a lock file.
/// Other transient patterns are checked before fatal ones so that e.g. a
/// timeout while fetching an invalid-looking URL is still retried. Anything
/// unrecognised is transient; the retry bound keeps that finite.
#[must_use]
pub fn classify_failure(exit_code: Option<i32>, diagnostics: &str) -> FailureClass {
    if matches!(exit_code, Some(126 | 127)) || PRIVILEGE.is_match(diagnostics) {
        return FailureClass::Fatal;
    }
    if TRANSIENT.is_match(diagnostics) {
        return FailureClass::Transient;
    }
    if FATAL.is_match(diagnostics) {
        return FailureClass::Fatal;
    }
    FailureClass::Transient
}

/// Trim captured stderr down to something that fits on one status line.
#[must_use]
pub fn summarize(stderr: &str) -> String {
    let last = stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .next_back()
        .unwrap_or("no diagnostic output");
    if last.chars().count() > 200 {
        let cut: String = last.chars().take(200).collect();
        format!("{cut}…")
    } else {
        last.to_string()
    }
}
