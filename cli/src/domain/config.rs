//! Domain types and validators for stackup configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::retry::RetryPolicy;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "base_dir",
    "timezone",
    "retry.package.max_attempts",
    "retry.package.delay_secs",
    "retry.workload.max_attempts",
    "retry.workload.delay_secs",
    "removal.confirm_data_separately",
];

/// Upper bound on configured attempts per strategy.
pub const MAX_ATTEMPTS_LIMIT: u32 = 10;

/// Upper bound on configured back-off, in seconds.
pub const MAX_DELAY_SECS: u64 = 300;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.stackup/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackupConfig {
    /// Directory under which every component gets its own directory.
    pub base_dir: PathBuf,
    /// Timezone passed to services through their `.env` file.
    pub timezone: String,
    pub retry: RetryConfig,
    pub removal: RemovalConfig,
}

impl Default for StackupConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("/opt/stackup"),
            timezone: "UTC".to_string(),
            retry: RetryConfig::default(),
            removal: RemovalConfig::default(),
        }
    }
}

/// Retry settings per class of operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Package-index and package-install operations.
    pub package: RetrySettings,
    /// Bringing component workloads up (image pulls).
    pub workload: RetrySettings,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            package: RetrySettings {
                max_attempts: 3,
                delay_secs: 10,
            },
            workload: RetrySettings {
                max_attempts: 3,
                delay_secs: 5,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub delay_secs: u64,
}

impl RetrySettings {
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_secs(self.delay_secs))
    }
}

/// Removal behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemovalConfig {
    /// Ask separately before deleting persisted data.
    pub confirm_data_separately: bool,
}

impl Default for RemovalConfig {
    fn default() -> Self {
        Self {
            confirm_data_separately: true,
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

fn invalid(key: &str, value: &str, expected: &str) -> anyhow::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
    .into()
}

fn is_valid_timezone(value: &str) -> bool {
    !value.is_empty()
        && value.split('/').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+'))
        })
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    match key {
        "base_dir" => {
            let path = std::path::Path::new(value);
            if !path.is_absolute() || path.parent().is_none() {
                return Err(invalid(key, value, "an absolute directory path other than /"));
            }
        }
        "timezone" => {
            if !is_valid_timezone(value) {
                return Err(invalid(key, value, "an IANA timezone such as UTC or Europe/Berlin"));
            }
        }
        "retry.package.max_attempts" | "retry.workload.max_attempts" => {
            match value.parse::<u32>() {
                Ok(n) if (1..=MAX_ATTEMPTS_LIMIT).contains(&n) => {}
                _ => {
                    return Err(invalid(
                        key,
                        value,
                        &format!("an integer from 1 to {MAX_ATTEMPTS_LIMIT}"),
                    ));
                }
            }
        }
        "retry.package.delay_secs" | "retry.workload.delay_secs" => match value.parse::<u64>() {
            Ok(n) if n <= MAX_DELAY_SECS => {}
            _ => {
                return Err(invalid(
                    key,
                    value,
                    &format!("an integer from 0 to {MAX_DELAY_SECS}"),
                ));
            }
        },
        "removal.confirm_data_separately" => {
            if value != "true" && value != "false" {
                return Err(invalid(key, value, "true or false"));
            }
        }
        _ => validate_config_key(key)?,
    }
    Ok(())
}

/// Validate `key`/`value` and apply them to `config`.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value is invalid.
pub fn apply_config_value(config: &mut StackupConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    // Values were validated above; parse failures here are unreachable.
    match key {
        "base_dir" => config.base_dir = PathBuf::from(value),
        "timezone" => config.timezone = value.to_string(),
        "retry.package.max_attempts" => config.retry.package.max_attempts = value.parse()?,
        "retry.package.delay_secs" => config.retry.package.delay_secs = value.parse()?,
        "retry.workload.max_attempts" => config.retry.workload.max_attempts = value.parse()?,
        "retry.workload.delay_secs" => config.retry.workload.delay_secs = value.parse()?,
        "removal.confirm_data_separately" => {
            config.removal.confirm_data_separately = value == "true";
        }
        _ => validate_config_key(key)?,
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
