//! `stackup install <component>`: install one component.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::{AppContext, Session};
use crate::application::services::lifecycle;
use crate::output::Renderer;

/// Arguments for the install command.
#[derive(Args)]
pub struct InstallArgs {
    /// Component to install (`n8n` or `proxy`)
    pub component: String,
}

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the component is unknown, already installed, or every
/// bring-up strategy fails.
pub async fn run(app: &AppContext, session: &Session, args: &InstallArgs) -> Result<ExitCode> {
    let component = session.component(&args.component)?;
    let resolution =
        lifecycle::install(&app.host, &session.settings, component, &app.reporter()).await?;
    match app.renderer() {
        Renderer::Human(r) => r.render_install(component, &resolution),
        Renderer::Json(r) => r.render_install(component, &resolution)?,
    }
    Ok(ExitCode::SUCCESS)
}
