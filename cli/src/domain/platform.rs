//! Host platform requirements.
//!
//! Parsing and decisions only; reading `/etc/os-release` and the effective
//! uid happens behind the `PlatformProbe` port.

use crate::domain::error::StartupError;

/// Fields of `/etc/os-release` that matter to the installer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    pub id: String,
    pub id_like: Vec<String>,
    pub version_codename: Option<String>,
    pub pretty_name: Option<String>,
}

impl OsRelease {
    fn is_family(&self, family: &str) -> bool {
        self.id == family || self.id_like.iter().any(|l| l == family)
    }
}

fn unquote(value: &str) -> &str {
    let v = value.trim();
    v.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| v.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(v)
}

/// Parse the `KEY=value` lines of an os-release file.
#[must_use]
pub fn parse_os_release(contents: &str) -> OsRelease {
    let mut release = OsRelease::default();
    for line in contents.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = unquote(value);
        match key {
            "ID" => release.id = value.to_ascii_lowercase(),
            "ID_LIKE" => {
                release.id_like = value
                    .split_whitespace()
                    .map(str::to_ascii_lowercase)
                    .collect();
            }
            "VERSION_CODENAME" if !value.is_empty() => {
                release.version_codename = Some(value.to_string());
            }
            "PRETTY_NAME" => release.pretty_name = Some(value.to_string()),
            _ => {}
        }
    }
    release
}

/// Vendor repository flavour for a supported release.
///
/// Ubuntu derivatives use the Ubuntu repository; everything else in the
/// Debian family uses the Debian one.
#[must_use]
pub fn apt_distro(release: &OsRelease) -> &'static str {
    if release.is_family("ubuntu") {
        "ubuntu"
    } else {
        "debian"
    }
}

/// Check that the host OS is a Debian-family Linux.
///
/// `os` is `std::env::consts::OS`.
///
/// # Errors
///
/// Returns `StartupError::UnsupportedPlatform` for non-Linux hosts, a missing
/// os-release file, or a distribution outside the Debian family.
pub fn check_supported(os: &str, release: Option<&OsRelease>) -> Result<(), StartupError> {
    if os != "linux" {
        return Err(StartupError::UnsupportedPlatform(os.to_string()));
    }
    let Some(release) = release else {
        return Err(StartupError::UnsupportedPlatform(
            "linux without /etc/os-release".to_string(),
        ));
    };
    if release.is_family("debian") || release.is_family("ubuntu") {
        Ok(())
    } else {
        let name = release
            .pretty_name
            .clone()
            .unwrap_or_else(|| release.id.clone());
        Err(StartupError::UnsupportedPlatform(name))
    }
}

/// Check that the process runs with root privileges.
///
/// # Errors
///
/// Returns `StartupError::NotRoot` when `uid` is not 0.
pub fn check_privilege(uid: u32) -> Result<(), StartupError> {
    if uid == 0 {
        Ok(())
    } else {
        Err(StartupError::NotRoot(uid))
    }
}
