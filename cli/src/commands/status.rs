//! `stackup status`: runtime and component status.
//!
//! Read-only, so it skips the privilege check and works for any user.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::lifecycle;
use crate::domain::component::Catalog;

/// Run the status command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or rendering fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let config = app.load_config()?;
    let catalog = Catalog::standard(&config.base_dir);
    let report = lifecycle::status_all(&app.host, &catalog).await;
    app.renderer().render_status(&report)?;
    Ok(ExitCode::SUCCESS)
}
