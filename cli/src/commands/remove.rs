//! `stackup remove <component>`: stop a component and optionally delete it.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::{AppContext, Session};
use crate::application::services::lifecycle::{self, RemovalRequest};
use crate::output::Renderer;

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Component to remove (`n8n` or `proxy`)
    pub component: String,

    /// Also delete the install directory and all data without asking
    #[arg(long, conflicts_with = "keep_data")]
    pub purge: bool,

    /// Stop the component but keep its directory and data without asking
    #[arg(long)]
    pub keep_data: bool,
}

impl RemoveArgs {
    fn delete_data(&self) -> Option<bool> {
        if self.purge {
            Some(true)
        } else if self.keep_data {
            Some(false)
        } else {
            None
        }
    }
}

/// Run the remove command.
///
/// # Errors
///
/// Returns an error if the component is unknown, a prompt fails, or the
/// install directory cannot be deleted.
pub async fn run(app: &AppContext, session: &Session, args: &RemoveArgs) -> Result<ExitCode> {
    let component = session.component(&args.component)?;
    let request = RemovalRequest {
        assume_yes: app.non_interactive,
        delete_data: args.delete_data(),
    };
    let outcome = lifecycle::remove(
        &app.host,
        &app.prompt,
        &session.settings,
        component,
        request,
        &app.reporter(),
    )
    .await?;
    match app.renderer() {
        Renderer::Human(r) => r.render_remove(component, outcome),
        Renderer::Json(r) => r.render_remove(component, outcome)?,
    }
    Ok(ExitCode::SUCCESS)
}
