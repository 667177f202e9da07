//! Component status derivation.

use stackup_cli::application::services::{lifecycle, state_tracker};
use stackup_cli::domain::ComponentStatus;
use stackup_cli::domain::error::LifecycleError;

use crate::mocks::{FakeHost, RecordingReporter, settings};

#[tokio::test]
async fn absent_when_install_dir_missing() {
    let host = FakeHost::new().with_runtime();
    let status = state_tracker::status(&host, host.component("n8n")).await;
    assert_eq!(status, ComponentStatus::Absent);
}

#[tokio::test]
async fn present_when_dir_exists_and_nothing_runs() {
    let host = FakeHost::new().with_runtime();
    host.install_stopped("n8n");
    let status = state_tracker::status(&host, host.component("n8n")).await;
    assert_eq!(status, ComponentStatus::Present);
}

#[tokio::test]
async fn running_when_a_workload_is_active() {
    let host = FakeHost::new().with_runtime();
    host.install_running("proxy");
    let status = state_tracker::status(&host, host.component("proxy")).await;
    assert_eq!(status, ComponentStatus::Running);
}

#[tokio::test]
async fn workload_without_install_dir_is_absent() {
    let host = FakeHost::new().with_runtime();
    host.install_running("proxy");
    std::fs::remove_dir_all(&host.component("proxy").install_path).expect("remove");
    let status = state_tracker::status(&host, host.component("proxy")).await;
    assert_eq!(status, ComponentStatus::Absent);
}

#[tokio::test]
async fn failed_workload_query_counts_as_present() {
    let mut host = FakeHost::new().with_runtime();
    host.inspector_down = true;
    host.install_running("n8n");
    let status = state_tracker::status(&host, host.component("n8n")).await;
    assert_eq!(status, ComponentStatus::Present);
}

#[tokio::test]
async fn crashed_workload_is_rederived_and_blocks_reinstall() {
    let host = FakeHost::new().with_runtime();
    host.install_running("proxy");
    host.kill("nginx-proxy-manager");
    let proxy = host.component("proxy");

    assert_eq!(
        state_tracker::status(&host, proxy).await,
        ComponentStatus::Present
    );

    let err = lifecycle::install(&host, &settings(), proxy, &RecordingReporter::default())
        .await
        .expect_err("present component conflicts");
    assert!(matches!(
        err.downcast_ref::<LifecycleError>(),
        Some(LifecycleError::Conflict { .. })
    ));
    assert_eq!(host.count_calls("up -d"), 0);
}

#[tokio::test]
async fn runtime_presence_follows_probe() {
    let missing = FakeHost::new();
    assert!(!state_tracker::runtime_present(&missing).await);

    let installed = FakeHost::new().with_runtime();
    assert!(state_tracker::runtime_present(&installed).await);
}
