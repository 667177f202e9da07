//! Interactive menu loop driven by scripted input.

use stackup_cli::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags, Session};
use stackup_cli::commands::menu;
use stackup_cli::domain::StackupConfig;
use stackup_cli::output::{HumanRenderer, OutputContext};

use crate::mocks::{FakeHost, RecordingReporter, ScriptedPrompt, settings};

fn session(host: &FakeHost) -> Session {
    Session {
        config: StackupConfig {
            base_dir: host.base_dir().to_path_buf(),
            ..StackupConfig::default()
        },
        catalog: host.catalog.clone(),
        settings: settings(),
    }
}

async fn drive(host: &FakeHost, prompt: &ScriptedPrompt, reporter: &RecordingReporter) {
    let ctx = OutputContext::new(true, false);
    let renderer = HumanRenderer::new(&ctx);
    menu::run_loop(host, prompt, reporter, &renderer, &session(host))
        .await
        .expect("menu loop");
}

#[tokio::test]
async fn quit_runs_nothing() {
    let host = FakeHost::new().with_runtime();
    let prompt = ScriptedPrompt::default().selecting(&["q"]);
    let reporter = RecordingReporter::default();

    drive(&host, &prompt, &reporter).await;

    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn end_of_input_leaves_the_loop() {
    let host = FakeHost::new().with_runtime();
    let prompt = ScriptedPrompt::default();
    let reporter = RecordingReporter::default();

    drive(&host, &prompt, &reporter).await;

    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn invalid_selection_is_reported_and_reprompted() {
    let host = FakeHost::new().with_runtime();
    let prompt = ScriptedPrompt::default().selecting(&["42", "banana", "s", "q"]);
    let reporter = RecordingReporter::default();

    drive(&host, &prompt, &reporter).await;

    let warnings = reporter.messages("warn");
    assert_eq!(warnings.len(), 2, "{warnings:?}");
    assert!(warnings[0].contains("'42'"));
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn install_entry_installs_component() {
    let host = FakeHost::new().with_runtime();
    let prompt = ScriptedPrompt::default().selecting(&["2", "q"]);
    let reporter = RecordingReporter::default();

    drive(&host, &prompt, &reporter).await;

    assert!(host.is_running("n8n"));
    assert!(host.component("n8n").compose_file().exists());
    assert!(reporter.messages("error").is_empty());
}

#[tokio::test]
async fn operation_error_is_reported_and_loop_continues() {
    let host = FakeHost::new();
    let prompt = ScriptedPrompt::default().selecting(&["4", "s", "q"]);
    let reporter = RecordingReporter::default();

    drive(&host, &prompt, &reporter).await;

    let errors = reporter.messages("error");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("stackup runtime"), "{}", errors[0]);
    assert!(!host.component("proxy").install_path.exists());
}

#[tokio::test]
async fn remove_entry_asks_before_deleting() {
    let host = FakeHost::new().with_runtime();
    host.install_running("proxy");
    let prompt = ScriptedPrompt::confirming(&[true, true]).selecting(&["5", "q"]);
    let reporter = RecordingReporter::default();

    drive(&host, &prompt, &reporter).await;

    assert_eq!(prompt.asked().len(), 2);
    assert!(!host.is_running("nginx-proxy-manager"));
    assert!(!host.component("proxy").install_path.exists());
}

#[tokio::test]
async fn runtime_entry_installs_runtime() {
    let host = FakeHost::new();
    let prompt = ScriptedPrompt::default().selecting(&["1", "q"]);
    let reporter = RecordingReporter::default();

    drive(&host, &prompt, &reporter).await;

    assert!(host.runtime_installed());
    assert_eq!(host.count_calls("docker-ce"), 1);
}

#[test]
fn menu_prompt_asks_even_with_yes_flag() {
    let app = AppContext::new(&AppFlags {
        output: OutputFlags {
            no_color: true,
            quiet: false,
            json: false,
        },
        behaviour: BehaviourFlags { yes: true },
    });

    assert!(app.non_interactive);
    assert!(app.prompt.non_interactive);
    assert!(!app.menu_prompt().non_interactive);
}
