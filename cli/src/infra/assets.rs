//! Embedded component payloads.
//!
//! At compile time, `include_dir!` embeds `cli/assets/`, one directory per
//! component:
//!   - `n8n/docker-compose.yml`
//!   - `proxy/docker-compose.yml`
//!
//! The files are written verbatim into the component's install directory.

use anyhow::Result;
use include_dir::{Dir, include_dir};

use crate::application::ports::{CommandRunner, PayloadSource};
use crate::domain::component::{Component, PayloadFile};
use crate::infra::host::SystemHost;

static PAYLOADS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Payload files for the component named `name`.
///
/// # Errors
///
/// Returns an error if no payload directory exists for `name`.
pub fn payload_for(name: &str) -> Result<Vec<PayloadFile>> {
    let dir = PAYLOADS
        .get_dir(name)
        .ok_or_else(|| anyhow::anyhow!("no embedded payload for component {name}"))?;
    let files = dir
        .files()
        .filter_map(|f| {
            let file_name = f.path().file_name()?.to_str()?.to_string();
            Some(PayloadFile {
                name: file_name,
                contents: f.contents().to_vec(),
            })
        })
        .collect();
    Ok(files)
}

impl<R: CommandRunner> PayloadSource for SystemHost<R> {
    fn payload(&self, component: &Component) -> Result<Vec<PayloadFile>> {
        payload_for(&component.name)
    }
}
