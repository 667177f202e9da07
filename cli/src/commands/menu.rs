//! `stackup menu`: the interactive control loop (default command).

use std::process::ExitCode;

use anyhow::Result;

use crate::app::{AppContext, Session};
use crate::application::ports::{Host, OperatorPrompt, ProgressReporter};
use crate::application::services::lifecycle::{self, RemovalRequest};
use crate::domain::menu::{MenuAction, menu_entries, parse_selection};
use crate::output::HumanRenderer;

const PROMPT: &str = "Select an option:";

/// Run the interactive menu until the operator quits or input ends.
///
/// Confirmations are always asked here, even under `--yes` or `CI`.
///
/// # Errors
///
/// Returns an error only if reading operator input fails. Operation failures
/// are reported and the loop continues.
pub async fn run(app: &AppContext, session: &Session) -> Result<ExitCode> {
    let renderer = HumanRenderer::new(&app.output);
    let prompt = app.menu_prompt();
    run_loop(&app.host, &prompt, &app.reporter(), &renderer, session).await?;
    Ok(ExitCode::SUCCESS)
}

/// The read-dispatch-render loop, generic over its ports.
///
/// Status is re-derived before every menu display. An invalid selection is
/// reported and re-prompts without redrawing.
///
/// # Errors
///
/// Returns an error if reading a selection or a confirmation fails.
pub async fn run_loop(
    host: &impl Host,
    prompt: &impl OperatorPrompt,
    reporter: &impl ProgressReporter,
    renderer: &HumanRenderer<'_>,
    session: &Session,
) -> Result<()> {
    let entries = menu_entries(&session.catalog);
    let count = session.catalog.len();
    let mut redraw = true;

    loop {
        if redraw {
            let report = lifecycle::status_all(host, &session.catalog).await;
            renderer.render_menu(&report, &entries);
        }

        let Some(line) = prompt.read_selection(PROMPT)? else {
            tracing::debug!("end of input, leaving menu");
            return Ok(());
        };
        let Some(action) = parse_selection(&line, count) else {
            reporter.warn(&format!("'{}' is not a menu option", line.trim()));
            redraw = false;
            continue;
        };
        redraw = true;

        match action {
            MenuAction::Quit => return Ok(()),
            MenuAction::Refresh => {}
            MenuAction::InstallRuntime => {
                match lifecycle::install_runtime(host, &session.settings, reporter).await {
                    Ok(outcome) => renderer.render_runtime(&outcome),
                    Err(e) => reporter.error(&format!("{e:#}")),
                }
            }
            MenuAction::Install(index) => {
                let Some(component) = session.catalog.components().get(index) else {
                    continue;
                };
                match lifecycle::install(host, &session.settings, component, reporter).await {
                    Ok(resolution) => renderer.render_install(component, &resolution),
                    Err(e) => reporter.error(&format!("{e:#}")),
                }
            }
            MenuAction::Remove(index) => {
                let Some(component) = session.catalog.components().get(index) else {
                    continue;
                };
                let request = RemovalRequest::default();
                match lifecycle::remove(host, prompt, &session.settings, component, request, reporter)
                    .await
                {
                    Ok(outcome) => renderer.render_remove(component, outcome),
                    Err(e) => reporter.error(&format!("{e:#}")),
                }
            }
        }
    }
}
