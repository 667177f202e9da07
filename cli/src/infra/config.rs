//! YAML-file implementation of the `ConfigStore` port.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::StackupConfig;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "STACKUP_CONFIG";

/// Config file under the operator's home directory.
const DEFAULT_RELATIVE_PATH: [&str; 2] = [".stackup", "config.yaml"];

/// Reads and writes `StackupConfig` as YAML.
///
/// Without a fixed path the location is `$STACKUP_CONFIG`, falling back to
/// `~/.stackup/config.yaml`, resolved on every call.
#[derive(Debug, Default)]
pub struct YamlConfigStore {
    fixed: Option<PathBuf>,
}

impl YamlConfigStore {
    /// A store bound to `path`, ignoring the environment.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            fixed: Some(path.into()),
        }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<StackupConfig> {
        let path = self.path()?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(StackupConfig::default());
            }
            Err(e) => return Err(e).with_context(|| format!("cannot read {}", path.display())),
        };
        // An empty file deserializes to `()`, not a mapping.
        if content.trim().is_empty() {
            return Ok(StackupConfig::default());
        }
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &StackupConfig) -> Result<()> {
        let path = self.path()?;
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        write_private(&path, content.as_bytes())
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.fixed {
            return Ok(path.clone());
        }
        if let Some(val) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(val));
        }
        let home = dirs::home_dir().context("cannot determine home directory")?;
        Ok(DEFAULT_RELATIVE_PATH.iter().fold(home, |p, part| p.join(part)))
    }
}

/// Write `contents` to `path`, creating parents, readable by the owner only.
fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("cannot write {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("cannot set permissions on {}", path.display()))?;
    }
    Ok(())
}
