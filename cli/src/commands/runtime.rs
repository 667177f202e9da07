//! `stackup runtime`: ensure the container runtime is installed.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::{AppContext, Session};
use crate::application::services::lifecycle;
use crate::output::Renderer;

/// Run the runtime command.
///
/// # Errors
///
/// Returns an error if every installation strategy fails.
pub async fn run(app: &AppContext, session: &Session) -> Result<ExitCode> {
    let outcome = lifecycle::install_runtime(&app.host, &session.settings, &app.reporter()).await?;
    match app.renderer() {
        Renderer::Human(r) => r.render_runtime(&outcome),
        Renderer::Json(r) => r.render_runtime(&outcome)?,
    }
    Ok(ExitCode::SUCCESS)
}
