//! Component state derivation.
//!
//! Nothing is cached: every call re-reads the filesystem and the runtime.

use crate::application::ports::{AttemptExecutor, LocalFs, WorkloadInspector};
use crate::domain::component::{Component, ComponentStatus};
use crate::domain::recipes;

/// Derive a component's status from its install directory and workloads.
///
/// A failing workload query counts as "nothing active".
pub async fn status(
    host: &(impl LocalFs + WorkloadInspector),
    component: &Component,
) -> ComponentStatus {
    if !host.exists(&component.install_path) {
        return ComponentStatus::Absent;
    }
    match host.active_workloads(&component.workload_names).await {
        Ok(active) if !active.is_empty() => ComponentStatus::Running,
        Ok(_) => ComponentStatus::Present,
        Err(e) => {
            tracing::warn!(component = %component.name, error = %e, "workload query failed");
            ComponentStatus::Present
        }
    }
}

/// Whether the container runtime answers its probe.
pub async fn runtime_present(executor: &impl AttemptExecutor) -> bool {
    executor.verify(&recipes::runtime_probe()).await.is_ok()
}
