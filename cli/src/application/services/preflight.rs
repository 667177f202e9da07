//! Startup checks: privilege and platform.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;

use crate::application::ports::PlatformProbe;
use crate::domain::error::StartupError;
use crate::domain::platform::{self, OsRelease};

/// Verify the host can run mutating commands and return its release info.
///
/// # Errors
///
/// Returns a `StartupError` (inside `anyhow::Error`) when the platform is
/// unsupported, the process is not root, or its uid cannot be read. Platform is checked first so a
/// non-Linux host never reaches the uid query.
pub async fn check_host(probe: &impl PlatformProbe) -> Result<OsRelease> {
    let release = probe.os_release().await;
    platform::check_supported(probe.os(), release.as_ref())?;
    let uid = probe
        .effective_uid()
        .await
        .map_err(|e| StartupError::PrivilegeUnknown(format!("{e:#}")))?;
    platform::check_privilege(uid)?;
    release.ok_or_else(|| StartupError::UnsupportedPlatform(probe.os().to_string()).into())
}
