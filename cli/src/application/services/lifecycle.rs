//! Component lifecycle: install, remove, status, and the runtime prerequisite.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Every operation re-derives state through the state tracker first, so each
//! one is safe to re-run after an interruption.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::application::ports::{Host, OperatorPrompt, ProgressReporter};
use crate::application::services::chain::{self, Resolution};
use crate::application::services::state_tracker;
use crate::domain::component::{
    Catalog, Component, ComponentReport, ComponentStatus, ENV_FILE, StatusReport,
    render_env_file,
};
use crate::domain::config::StackupConfig;
use crate::domain::error::LifecycleError;
use crate::domain::recipes;
use crate::domain::retry::RetryPolicy;

/// Settings the lifecycle operations need, fixed at startup.
#[derive(Debug, Clone)]
pub struct LifecycleSettings {
    pub timezone: String,
    pub package_retry: RetryPolicy,
    pub workload_retry: RetryPolicy,
    pub confirm_data_separately: bool,
    /// Vendor repository flavour, `ubuntu` or `debian`.
    pub distro: String,
}

impl LifecycleSettings {
    #[must_use]
    pub fn from_config(config: &StackupConfig, distro: &str) -> Self {
        Self {
            timezone: config.timezone.clone(),
            package_retry: config.retry.package.policy(),
            workload_retry: config.retry.workload.policy(),
            confirm_data_separately: config.removal.confirm_data_separately,
            distro: distro.to_string(),
        }
    }
}

/// Operator answers for a removal, gathered up front where known.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemovalRequest {
    /// Skip the removal confirmation (`--yes`).
    pub assume_yes: bool,
    /// Pre-answered data deletion (`--purge`); `None` asks the operator.
    pub delete_data: Option<bool>,
}

/// Result of `remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Nothing was installed.
    NotFound,
    /// The operator declined; nothing changed.
    Cancelled,
    /// Workloads stopped; directory and data kept.
    Stopped,
    /// Workloads stopped and the install directory deleted.
    Removed,
}

/// Result of `install_runtime`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeOutcome {
    AlreadyPresent,
    Installed { strategy: String },
}

/// Install a component.
///
/// # Errors
///
/// Returns `LifecycleError::Conflict` if the component is not Absent,
/// `LifecycleError::RuntimeMissing` if no container runtime answers, and
/// `LifecycleError::Failed` if every bring-up strategy failed. Containers
/// left by a failed bring-up are torn down and any directory created by this
/// call is removed before a failure is returned.
pub async fn install(
    host: &impl Host,
    settings: &LifecycleSettings,
    component: &Component,
    reporter: &impl ProgressReporter,
) -> Result<Resolution> {
    let status = state_tracker::status(host, component).await;
    if status != ComponentStatus::Absent {
        return Err(LifecycleError::Conflict {
            component: component.name.clone(),
            status: status.to_string(),
        }
        .into());
    }
    if !state_tracker::runtime_present(host).await {
        return Err(LifecycleError::RuntimeMissing.into());
    }

    reporter.step(&format!("preparing {}...", component.install_path.display()));
    if let Err(e) = write_install_dir(host, settings, component) {
        rollback(host, component);
        return Err(e);
    }

    let goal = format!("start {}", component.name);
    let strategies = recipes::workload_up_strategies(component, settings.workload_retry);
    match chain::resolve(host, &goal, &strategies, reporter).await {
        Ok(resolution) => {
            reporter.success(&format!("{} is running", component.title));
            Ok(resolution)
        }
        Err(source) => {
            reporter.step(&format!("rolling back {}...", component.name));
            stop_workloads(host, component, reporter).await;
            rollback(host, component);
            Err(LifecycleError::Failed {
                component: component.name.clone(),
                source,
            }
            .into())
        }
    }
}

fn write_install_dir(
    host: &impl Host,
    settings: &LifecycleSettings,
    component: &Component,
) -> Result<()> {
    let dir = &component.install_path;
    host.create_dir_all(dir)?;
    for data in &component.data_dirs {
        host.create_dir_all(&dir.join(data))?;
    }
    let payload = host
        .payload(component)
        .with_context(|| format!("loading configuration for {}", component.name))?;
    for file in payload {
        host.write(&dir.join(&file.name), &file.contents)?;
    }
    let env = render_env_file(component, &settings.timezone);
    host.write(&dir.join(ENV_FILE), env.as_bytes())
}

/// Best-effort: returns whether the workloads are confirmed stopped.
async fn stop_workloads(
    host: &impl Host,
    component: &Component,
    reporter: &impl ProgressReporter,
) -> bool {
    let goal = format!("stop {}", component.name);
    let strategies = recipes::workload_stop_strategies(component);
    match chain::resolve(host, &goal, &strategies, reporter).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(component = %component.name, error = %e, "stop failed");
            reporter.warn(&format!("could not confirm {} stopped; continuing", component.title));
            false
        }
    }
}

fn rollback(host: &impl Host, component: &Component) {
    if !host.exists(&component.install_path) {
        return;
    }
    if let Err(e) = host.remove_dir_all(&component.install_path) {
        tracing::warn!(
            component = %component.name,
            error = %e,
            "rollback could not remove install directory"
        );
    }
}

/// Remove a component, asking the operator where the request leaves it open.
///
/// # Errors
///
/// Returns an error if the prompt fails or the install directory cannot be
/// deleted. Failing to stop workloads is reported as a warning only.
pub async fn remove(
    host: &impl Host,
    prompt: &impl OperatorPrompt,
    settings: &LifecycleSettings,
    component: &Component,
    request: RemovalRequest,
    reporter: &impl ProgressReporter,
) -> Result<RemoveOutcome> {
    let status = state_tracker::status(host, component).await;
    if status == ComponentStatus::Absent {
        return Ok(RemoveOutcome::NotFound);
    }

    let confirmed = request.assume_yes
        || prompt.confirm(&format!("Remove {} ({status})?", component.title), false)?;
    if !confirmed {
        return Ok(RemoveOutcome::Cancelled);
    }

    reporter.step(&format!("stopping {}...", component.title));
    if stop_workloads(host, component, reporter).await {
        reporter.success(&format!("{} stopped", component.title));
    }

    let delete_data = match request.delete_data {
        Some(answer) => answer,
        None if !settings.confirm_data_separately => true,
        None if request.assume_yes => false,
        None => {
            let what = if component.is_stateful() {
                "and all of its data"
            } else {
                "and its configuration"
            };
            prompt.confirm(
                &format!(
                    "Also delete {} {what}? This cannot be undone.",
                    component.install_path.display()
                ),
                false,
            )?
        }
    };
    if !delete_data {
        return Ok(RemoveOutcome::Stopped);
    }

    host.remove_dir_all(&component.install_path)?;
    reporter.success(&format!("{} removed", component.title));
    Ok(RemoveOutcome::Removed)
}

/// Make sure a container runtime is installed.
///
/// # Errors
///
/// Returns `LifecycleError::Failed` if every installation strategy failed.
pub async fn install_runtime(
    host: &impl Host,
    settings: &LifecycleSettings,
    reporter: &impl ProgressReporter,
) -> Result<RuntimeOutcome> {
    if state_tracker::runtime_present(host).await {
        return Ok(RuntimeOutcome::AlreadyPresent);
    }

    let strategies = recipes::runtime_strategies(&settings.distro, settings.package_retry);
    let resolution = chain::resolve(host, "install the container runtime", &strategies, reporter)
        .await
        .map_err(|source| LifecycleError::Failed {
            component: "the container runtime".to_string(),
            source,
        })?;

    let started = host.run(&recipes::runtime_service_start()).await;
    if let Some(reason) = started.reason() {
        tracing::warn!(%reason, "could not enable the runtime service");
        reporter.warn("installed, but the runtime service could not be enabled");
    }
    reporter.success(&format!("container runtime installed via {}", resolution.strategy));
    Ok(RuntimeOutcome::Installed {
        strategy: resolution.strategy,
    })
}

/// Status of the runtime and every catalog component.
pub async fn status_all(host: &impl Host, catalog: &Catalog) -> StatusReport {
    let mut components = Vec::with_capacity(catalog.len());
    for component in catalog.components() {
        components.push(ComponentReport {
            name: component.name.clone(),
            title: component.title.clone(),
            status: state_tracker::status(host, component).await,
            install_path: component.install_path.clone(),
        });
    }
    StatusReport {
        runtime_present: state_tracker::runtime_present(host).await,
        components,
        checked_at: Utc::now(),
    }
}
