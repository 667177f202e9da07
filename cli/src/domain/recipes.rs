//! Strategy lists for each provisioning goal.
//!
//! Pure builders: they decide which commands make up each alternative and
//! in which order the alternatives are tried, but run nothing.

use std::time::Duration;

use crate::domain::component::Component;
use crate::domain::retry::RetryPolicy;
use crate::domain::strategy::{Action, Check, CommandSpec, Strategy};

/// Package installs can take a while on slow mirrors.
const PACKAGE_TIMEOUT: Duration = Duration::from_secs(900);

/// Image pulls happen inside `compose up`.
const COMPOSE_UP_TIMEOUT: Duration = Duration::from_secs(600);

const COMPOSE_DOWN_TIMEOUT: Duration = Duration::from_secs(120);

/// Probe answering "is a container runtime available?".
#[must_use]
pub fn runtime_probe() -> Check {
    Check::Succeeds(Action::run("docker", ["--version"]))
}

fn apt(args: &[&str]) -> CommandSpec {
    let mut full = vec!["DEBIAN_FRONTEND=noninteractive", "apt-get"];
    full.extend_from_slice(args);
    CommandSpec::new("env", full).with_timeout(PACKAGE_TIMEOUT)
}

/// Repairs an interrupted dpkg run and clears stale package caches.
#[must_use]
pub fn package_remediation() -> Action {
    Action::Sequence(vec![
        CommandSpec::new("dpkg", ["--configure", "-a"]).with_timeout(PACKAGE_TIMEOUT),
        apt(&["-f", "install", "-y"]),
        apt(&["clean"]),
    ])
}

/// Ways to obtain a working container runtime, most preferred first.
///
/// `distro` selects the vendor repository path (`ubuntu` or `debian`).
#[must_use]
pub fn runtime_strategies(distro: &str, policy: RetryPolicy) -> Vec<Strategy> {
    let repo_line = format!(
        "echo \"deb [arch=$(dpkg --print-architecture) signed-by=/etc/apt/keyrings/docker.asc] \
         https://download.docker.com/linux/{distro} $(. /etc/os-release && echo \"$VERSION_CODENAME\") stable\" \
         > /etc/apt/sources.list.d/docker.list"
    );
    let gpg_url = format!("https://download.docker.com/linux/{distro}/gpg");
    let vendor = Action::Sequence(vec![
        apt(&["update"]),
        apt(&["install", "-y", "ca-certificates", "curl"]),
        CommandSpec::new("install", ["-m", "0755", "-d", "/etc/apt/keyrings"]),
        CommandSpec::new(
            "curl",
            ["-fsSL", gpg_url.as_str(), "-o", "/etc/apt/keyrings/docker.asc"],
        )
        .with_timeout(Duration::from_secs(120)),
        CommandSpec::new("chmod", ["a+r", "/etc/apt/keyrings/docker.asc"]),
        CommandSpec::new("sh", ["-c", repo_line.as_str()]),
        apt(&["update"]),
        apt(&[
            "install",
            "-y",
            "docker-ce",
            "docker-ce-cli",
            "containerd.io",
            "docker-compose-plugin",
        ]),
    ]);

    let native = Action::Sequence(vec![
        apt(&["update"]),
        apt(&["install", "-y", "docker.io", "docker-compose"]),
    ]);

    let store = Action::Run(
        CommandSpec::new("snap", ["install", "docker"]).with_timeout(PACKAGE_TIMEOUT),
    );

    vec![
        Strategy::new(1, "vendor repository", vendor)
            .verify(runtime_probe())
            .remediation(package_remediation())
            .retry(policy),
        Strategy::new(2, "distribution package", native)
            .verify(runtime_probe())
            .remediation(package_remediation())
            .retry(policy),
        Strategy::new(3, "snap store", store)
            .verify(runtime_probe())
            .retry(policy),
    ]
}

/// Enable and start the runtime's background service.
#[must_use]
pub fn runtime_service_start() -> Action {
    Action::run("systemctl", ["enable", "--now", "docker"])
}

fn compose_args<'a>(
    component: &'a Component,
    file: &'a str,
    dir: &'a str,
    tail: &[&'a str],
) -> Vec<&'a str> {
    let mut args = vec![
        "-p",
        component.name.as_str(),
        "-f",
        file,
        "--project-directory",
        dir,
    ];
    args.extend_from_slice(tail);
    args
}

/// Ways to bring a component's workloads up, most preferred first.
#[must_use]
pub fn workload_up_strategies(component: &Component, policy: RetryPolicy) -> Vec<Strategy> {
    let file = component.compose_file().display().to_string();
    let dir = component.install_path.display().to_string();

    let mut plugin_args = vec!["compose"];
    plugin_args.extend(compose_args(component, &file, &dir, &["up", "-d"]));
    let plugin = CommandSpec::new("docker", plugin_args).with_timeout(COMPOSE_UP_TIMEOUT);

    let standalone = CommandSpec::new(
        "docker-compose",
        compose_args(component, &file, &dir, &["up", "-d"]),
    )
    .with_timeout(COMPOSE_UP_TIMEOUT);

    let running = Check::WorkloadsActive(component.workload_names.clone());
    vec![
        Strategy::new(1, "compose plugin", Action::Run(plugin))
            .verify(running.clone())
            .retry(policy),
        Strategy::new(2, "standalone compose", Action::Run(standalone))
            .verify(running)
            .retry(policy),
    ]
}

/// Ways to stop a component's workloads, most graceful first.
#[must_use]
pub fn workload_stop_strategies(component: &Component) -> Vec<Strategy> {
    let file = component.compose_file().display().to_string();
    let dir = component.install_path.display().to_string();

    let mut plugin_args = vec!["compose"];
    plugin_args.extend(compose_args(component, &file, &dir, &["down"]));
    let plugin = CommandSpec::new("docker", plugin_args).with_timeout(COMPOSE_DOWN_TIMEOUT);

    let standalone = CommandSpec::new(
        "docker-compose",
        compose_args(component, &file, &dir, &["down"]),
    )
    .with_timeout(COMPOSE_DOWN_TIMEOUT);

    let mut rm_args = vec!["rm".to_string(), "-f".to_string()];
    rm_args.extend(component.workload_names.iter().cloned());
    let force = CommandSpec::new("docker", rm_args).with_timeout(COMPOSE_DOWN_TIMEOUT);

    let stopped = Check::WorkloadsStopped(component.workload_names.clone());
    vec![
        Strategy::new(1, "compose plugin down", Action::Run(plugin)).verify(stopped.clone()),
        Strategy::new(2, "standalone compose down", Action::Run(standalone))
            .verify(stopped.clone()),
        Strategy::new(3, "force remove containers", Action::Run(force)).verify(stopped),
    ]
}
