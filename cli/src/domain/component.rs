//! Component catalog and status types.
//!
//! The catalog is fixed at startup. Only the on-disk presence of each
//! component changes, and that is never cached here.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Name of the compose file written into every component directory.
pub const COMPOSE_FILE: &str = "docker-compose.yml";

/// Name of the generated environment file next to the compose file.
pub const ENV_FILE: &str = ".env";

/// One independently installable service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Unique key, e.g. `"n8n"`.
    pub name: String,
    /// Display name for menus and status output.
    pub title: String,
    /// Directory holding configuration and data; its existence is the install marker.
    pub install_path: PathBuf,
    /// Container names that make up the running service.
    pub workload_names: Vec<String>,
    /// Persisted-data directories, relative to `install_path`.
    pub data_dirs: Vec<String>,
}

impl Component {
    #[must_use]
    pub fn compose_file(&self) -> PathBuf {
        self.install_path.join(COMPOSE_FILE)
    }

    #[must_use]
    pub fn is_stateful(&self) -> bool {
        !self.data_dirs.is_empty()
    }
}

/// Derived install state of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Absent,
    Present,
    Running,
}

impl std::fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Absent => "not installed",
            Self::Present => "installed (stopped)",
            Self::Running => "running",
        })
    }
}

/// Opaque configuration file written verbatim into a component directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadFile {
    /// File name relative to the component directory.
    pub name: String,
    pub contents: Vec<u8>,
}

/// The fixed set of installable components.
#[derive(Debug, Clone)]
pub struct Catalog {
    components: Vec<Component>,
}

impl Catalog {
    /// The standard catalog rooted at `base_dir`.
    #[must_use]
    pub fn standard(base_dir: &Path) -> Self {
        Self {
            components: vec![
                Component {
                    name: "n8n".to_string(),
                    title: "n8n workflow automation".to_string(),
                    install_path: base_dir.join("n8n"),
                    workload_names: vec!["n8n".to_string()],
                    data_dirs: vec!["data".to_string()],
                },
                Component {
                    name: "proxy".to_string(),
                    title: "Nginx Proxy Manager".to_string(),
                    install_path: base_dir.join("proxy"),
                    workload_names: vec!["nginx-proxy-manager".to_string()],
                    data_dirs: vec!["data".to_string(), "letsencrypt".to_string()],
                },
            ],
        }
    }

    /// Build a catalog from explicit components (used by tests and embedders).
    #[must_use]
    pub fn from_components(components: Vec<Component>) -> Self {
        Self { components }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Comma-separated component names, for error messages.
    #[must_use]
    pub fn names(&self) -> String {
        self.components
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Status of one component, as shown to the operator.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentReport {
    pub name: String,
    pub title: String,
    pub status: ComponentStatus,
    pub install_path: PathBuf,
}

/// Snapshot of the runtime and every catalog component.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub runtime_present: bool,
    pub components: Vec<ComponentReport>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

/// Render the generated `.env` file for a component.
///
/// Compose reads it for variable substitution in the payload.
#[must_use]
pub fn render_env_file(component: &Component, timezone: &str) -> String {
    format!(
        "# Generated by stackup. Edits are kept until the component is removed.\n\
         TZ={timezone}\n\
         GENERIC_TIMEZONE={timezone}\n\
         STACKUP_COMPONENT={}\n\
         STACKUP_DIR={}\n",
        component.name,
        component.install_path.display()
    )
}
