//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{StackupConfig, apply_config_value};

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed.
pub fn load_config(store: &impl ConfigStore) -> Result<StackupConfig> {
    store.load()
}

/// Validate and persist a single setting, returning the updated config.
///
/// Nothing is written when the key or value is rejected.
///
/// # Errors
///
/// Returns a `ConfigError` for an unknown key or invalid value, or an I/O
/// error if the file cannot be written.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<StackupConfig> {
    let mut config = store.load()?;
    apply_config_value(&mut config, key, value)?;
    store.save(&config)?;
    Ok(config)
}
